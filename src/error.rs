// ============================================================================
// ERRORES - Taxonomía de fallos de autenticación y de red
// ============================================================================

use thiserror::Error;

pub const GENERIC_CREDENTIALS_MESSAGE: &str = "Credenciales inválidas";
pub const GENERIC_PERMISSION_MESSAGE: &str = "Solo los administradores pueden registrar nuevos usuarios.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Login rechazado por el servidor
    #[error("{0}")]
    InvalidCredentials(String),

    /// 401 en una llamada autenticada
    #[error("No autorizado")]
    Unauthorized,

    /// No hay token guardado para una llamada autenticada
    #[error("No hay sesión activa")]
    MissingToken,

    /// 403: el usuario no tiene el rol necesario
    #[error("{0}")]
    PermissionDenied(String),

    /// Respuesta no-2xx con detalle del servidor
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    /// Validación local, antes de hablar con el servidor
    #[error("{0}")]
    Validation(String),

    #[error("Error de conexión: {0}")]
    Transport(String),

    #[error("Respuesta inesperada del servidor: {0}")]
    MalformedResponse(String),

    #[error("Error de almacenamiento: {0}")]
    Storage(String),
}

impl AuthError {
    /// Token expirado, inválido o ausente
    pub fn is_authorization_failure(&self) -> bool {
        matches!(self, AuthError::Unauthorized | AuthError::MissingToken)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, AuthError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_server_detail() {
        let err = AuthError::Rejected { status: 400, detail: "Email ya registrado".into() };
        assert_eq!(err.to_string(), "Email ya registrado");
        assert_eq!(
            AuthError::InvalidCredentials(GENERIC_CREDENTIALS_MESSAGE.into()).to_string(),
            "Credenciales inválidas"
        );
    }

    #[test]
    fn authorization_failures_are_grouped() {
        assert!(AuthError::Unauthorized.is_authorization_failure());
        assert!(AuthError::MissingToken.is_authorization_failure());
        assert!(!AuthError::PermissionDenied("x".into()).is_authorization_failure());
        assert!(AuthError::Transport("down".into()).is_transport());
    }
}
