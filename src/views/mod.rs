// ============================================================================
// VIEWS - Funciones que renderizan DOM (sin lógica de negocio)
// ============================================================================

pub mod app;
pub mod dashboard;
pub mod forgot_password;
pub mod form;
pub mod inactivity_modal;
pub mod login;
pub mod register;
pub mod reset_password;
pub mod unlock_account;

pub use app::render_route;
pub use dashboard::render_dashboard;
pub use forgot_password::render_forgot_password;
pub use login::render_login;
pub use register::render_register;
pub use reset_password::render_reset_password;
pub use unlock_account::render_unlock_account;
