use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base del API remoto. Vacío = mismo origen que la app
    pub api_base_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub token_storage_key: String,
    pub session: SessionConfig,
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            environment: "development".to_string(),
            enable_logging: true,
            token_storage_key: "access_token".to_string(),
            session: SessionConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

/// Tiempos del control de inactividad y de las redirecciones de sesión
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub inactivity_minutes: u32,
    pub warning_seconds: u32,
    pub logout_redirect_delay_ms: u32,
    pub unauthorized_redirect_delay_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inactivity_minutes: 28,
            warning_seconds: 120,
            logout_redirect_delay_ms: 1_000,
            unauthorized_redirect_delay_ms: 2_000,
        }
    }
}

impl SessionConfig {
    /// Satura en `u32::MAX` con valores absurdos de `INACTIVITY_MINUTES`
    pub fn inactivity_ms(&self) -> u32 {
        self.inactivity_minutes.saturating_mul(60_000)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tiempo que un error de formulario queda visible
    pub error_dismiss_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { error_dismiss_ms: 5_000 }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: option_env!("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            token_storage_key: option_env!("TOKEN_STORAGE_KEY")
                .unwrap_or("access_token").to_string(),
            session: SessionConfig {
                inactivity_minutes: option_env!("INACTIVITY_MINUTES")
                    .unwrap_or("28").parse().unwrap_or(defaults.session.inactivity_minutes),
                warning_seconds: option_env!("WARNING_SECONDS")
                    .unwrap_or("120").parse().unwrap_or(defaults.session.warning_seconds),
                logout_redirect_delay_ms: option_env!("LOGOUT_REDIRECT_DELAY_MS")
                    .unwrap_or("1000").parse().unwrap_or(defaults.session.logout_redirect_delay_ms),
                unauthorized_redirect_delay_ms: option_env!("UNAUTHORIZED_REDIRECT_DELAY_MS")
                    .unwrap_or("2000").parse().unwrap_or(defaults.session.unauthorized_redirect_delay_ms),
            },
            ui: UiConfig {
                error_dismiss_ms: option_env!("ERROR_DISMISS_MS")
                    .unwrap_or("5000").parse().unwrap_or(defaults.ui.error_dismiss_ms),
            },
        }
    }

    /// Nivel de log según entorno
    pub fn log_level(&self) -> log::Level {
        if !self.enable_logging {
            log::Level::Error
        } else if self.environment == "production" {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_timings() {
        let config = AppConfig::default();
        assert_eq!(config.session.inactivity_ms(), 28 * 60 * 1_000);
        assert_eq!(config.session.warning_seconds, 120);
        assert_eq!(config.session.logout_redirect_delay_ms, 1_000);
        assert_eq!(config.session.unauthorized_redirect_delay_ms, 2_000);
        assert_eq!(config.ui.error_dismiss_ms, 5_000);
        assert_eq!(config.token_storage_key, "access_token");
    }

    #[test]
    fn huge_inactivity_minutes_saturate() {
        let session = SessionConfig { inactivity_minutes: 80_000, ..SessionConfig::default() };
        assert_eq!(session.inactivity_ms(), u32::MAX);
        let session = SessionConfig { inactivity_minutes: 71_582, ..SessionConfig::default() };
        assert_eq!(session.inactivity_ms(), 71_582 * 60_000);
    }

    #[test]
    fn logging_disabled_only_keeps_errors() {
        let config = AppConfig { enable_logging: false, ..AppConfig::default() };
        assert_eq!(config.log_level(), log::Level::Error);
    }
}
