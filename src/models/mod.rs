pub mod auth;
pub mod user;

pub use auth::{
    DashboardResponse, ForgotPasswordRequest, LoginOutcome, LoginRequest, LoginResponse, MessageResponse,
    RegisterData, ResetPasswordRequest, VerifyResponse,
};
pub use user::{Role, User, UserId};
