// Rutas de la app (cliente)
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const REGISTER_PATH: &str = "/register";
pub const ROOT_PATH: &str = "/";
pub const RESET_PASSWORD_PATH: &str = "/reset-password";
pub const UNLOCK_ACCOUNT_PATH: &str = "/unlock-account";
pub const FORGOT_PASSWORD_PATH: &str = "/forgot-password";

/// Destinos dentro de la app que no piden confirmación al salir del dashboard
pub const ALLOWED_EXIT_PATHS: [&str; 3] = ["/register", "/users", "/departments"];

// Endpoints del API remoto
pub const API_LOGIN: &str = "/login";
pub const API_VERIFY: &str = "/verify-auth";
pub const API_DASHBOARD: &str = "/dashboard";
pub const API_REGISTER: &str = "/register";
pub const API_LOGOUT: &str = "/logout";
pub const API_FORGOT_PASSWORD: &str = "/auth/forgot-password";
pub const API_RESET_PASSWORD: &str = "/auth/reset-password";
pub const API_UNLOCK_ACCOUNT: &str = "/auth/unlock-account";

// Mensajes
pub const AUTO_LOGOUT_NOTICE: &str = "Tu sesión ha expirado por inactividad. Serás redirigido al login.";
pub const LOGOUT_CONFIRM: &str = "¿Estás seguro de que deseas cerrar sesión?";
pub const LEAVE_PAGE_CONFIRM: &str = "¿Estás seguro de que deseas salir?";
pub const REGISTER_SUCCESS: &str = "Usuario registrado exitosamente";
