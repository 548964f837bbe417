// ============================================================================
// VIEWMODELS - Lógica de pantallas sin DOM
// ============================================================================

pub mod account_viewmodel;
pub mod auth_viewmodel;
pub mod dashboard_viewmodel;
pub mod inactivity_controller;

pub use account_viewmodel::{
    AccountMessage, ForgotPasswordViewModel, MessageKind, ResetPasswordViewModel, UnlockAccountViewModel,
};
pub use auth_viewmodel::{LoginViewModel, RegisterAccess, RegisterViewModel};
pub use dashboard_viewmodel::{DashboardLoad, DashboardViewModel};
pub use inactivity_controller::{
    InactivityConfig, InactivityController, InactivityDeps, InactivityPhase, InactivitySnapshot,
    InactivityTimerState,
};
