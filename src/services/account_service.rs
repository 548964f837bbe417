use std::rc::Rc;
use crate::error::AuthError;
use crate::models::{ForgotPasswordRequest, MessageResponse, ResetPasswordRequest};
use crate::services::http::{ApiRequest, ApiResponse, HttpTransport};
use crate::utils::{API_FORGOT_PASSWORD, API_RESET_PASSWORD, API_UNLOCK_ACCOUNT};

pub const FORGOT_SENT: &str = "Si el correo electrónico existe, se ha enviado un enlace para restablecer la contraseña.";
pub const FORGOT_FAILURE: &str = "No se pudo enviar el enlace de recuperación.";
pub const RESET_SUCCESS: &str = "Contraseña restablecida con éxito. ¡Ya puedes iniciar sesión!";
pub const RESET_FAILURE: &str = "Ha ocurrido un error al restablecer la contraseña.";
pub const UNLOCK_SUCCESS: &str = "Cuenta desbloqueada con éxito.";
pub const UNLOCK_FAILURE: &str = "Ha ocurrido un error al desbloquear la cuenta.";
pub const PASSWORD_MISMATCH: &str = "Las contraseñas no coinciden.";
pub const INVALID_EMAIL: &str = "Introduce un correo electrónico válido.";

/// Endpoints públicos de cuenta (enlaces que llegan por correo)
pub struct AccountService {
    transport: Rc<dyn HttpTransport>,
}

impl AccountService {
    pub fn new(transport: Rc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// POST /auth/forgot-password. El servidor responde igual exista o no el correo
    pub async fn request_password_reset(&self, email: &str) -> Result<String, AuthError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::Validation(INVALID_EMAIL.to_string()));
        }

        let request = ApiRequest::post(API_FORGOT_PASSWORD).json(&ForgotPasswordRequest {
            email: email.to_string(),
        })?;
        let response = self.transport.send(request).await?;
        log::info!("📧 [ACCOUNT] forgot-password -> {}", response.status);
        message_or_detail(&response, FORGOT_SENT, FORGOT_FAILURE)
    }

    /// POST /auth/reset-password
    pub async fn reset_password(
        &self,
        token: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<String, AuthError> {
        if password != password_confirm {
            return Err(AuthError::Validation(PASSWORD_MISMATCH.to_string()));
        }

        let request = ApiRequest::post(API_RESET_PASSWORD).json(&ResetPasswordRequest {
            token: token.to_string(),
            password: password.to_string(),
            password_confirm: password_confirm.to_string(),
        })?;
        let response = self.transport.send(request).await?;
        log::info!("🔑 [ACCOUNT] reset-password -> {}", response.status);
        message_or_detail(&response, RESET_SUCCESS, RESET_FAILURE)
    }

    /// GET /auth/unlock-account?token=
    pub async fn unlock_account(&self, token: &str) -> Result<String, AuthError> {
        let response = self
            .transport
            .send(ApiRequest::get(API_UNLOCK_ACCOUNT).query("token", token))
            .await?;
        log::info!("🔓 [ACCOUNT] unlock-account -> {}", response.status);
        message_or_detail(&response, UNLOCK_SUCCESS, UNLOCK_FAILURE)
    }
}

fn message_or_detail(response: &ApiResponse, success: &str, failure: &str) -> Result<String, AuthError> {
    if response.ok() {
        let message = response
            .json::<MessageResponse>()
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| success.to_string());
        Ok(message)
    } else {
        Err(AuthError::Rejected {
            status: response.status,
            detail: response.detail().unwrap_or_else(|| failure.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::{Method, RequestBody};
    use crate::testing::FakeTransport;
    use futures::executor::block_on;

    fn service() -> (Rc<FakeTransport>, AccountService) {
        let transport = Rc::new(FakeTransport::default());
        (transport.clone(), AccountService::new(transport))
    }

    #[test]
    fn mismatched_passwords_never_reach_the_server() {
        let (transport, service) = service();
        assert_eq!(
            block_on(service.reset_password("tok", "uno", "dos")),
            Err(AuthError::Validation(PASSWORD_MISMATCH.into()))
        );
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn reset_posts_json_and_uses_default_success_message() {
        let (transport, service) = service();
        transport.reply_json(200, "{}");

        let message = block_on(service.reset_password("tok", "nueva", "nueva")).unwrap();

        assert_eq!(message, RESET_SUCCESS);
        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.path, "/auth/reset-password");
        assert_eq!(
            sent.body,
            RequestBody::Json(serde_json::json!({
                "token": "tok",
                "password": "nueva",
                "passwordConfirm": "nueva",
            }))
        );
    }

    #[test]
    fn reset_failure_uses_detail() {
        let (transport, service) = service();
        transport.reply_json(400, r#"{"detail":"Token expirado"}"#);
        assert_eq!(
            block_on(service.reset_password("tok", "a", "a")),
            Err(AuthError::Rejected { status: 400, detail: "Token expirado".into() })
        );
    }

    #[test]
    fn forgot_password_posts_email_and_relays_server_message() {
        let (transport, service) = service();
        transport.reply_json(200, r#"{"message":"Revisa tu correo"}"#);

        let message = block_on(service.request_password_reset(" ana@docs.io ")).unwrap();

        assert_eq!(message, "Revisa tu correo");
        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.path, "/auth/forgot-password");
        assert_eq!(sent.body, RequestBody::Json(serde_json::json!({ "email": "ana@docs.io" })));
    }

    #[test]
    fn forgot_password_rejects_bad_email_locally() {
        let (transport, service) = service();
        assert_eq!(
            block_on(service.request_password_reset("ana")),
            Err(AuthError::Validation(INVALID_EMAIL.into()))
        );
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn unlock_sends_token_in_query() {
        let (transport, service) = service();
        transport.reply_json(200, r#"{"message":"Cuenta de ana desbloqueada"}"#);

        let message = block_on(service.unlock_account("abc")).unwrap();

        assert_eq!(message, "Cuenta de ana desbloqueada");
        let sent = &transport.requests()[0];
        assert_eq!(sent.path, "/auth/unlock-account");
        assert_eq!(sent.query, vec![("token".to_string(), "abc".to_string())]);
    }

    #[test]
    fn unlock_failure_without_detail_uses_default() {
        let (transport, service) = service();
        transport.reply_json(404, "{}");
        assert_eq!(
            block_on(service.unlock_account("abc")),
            Err(AuthError::Rejected { status: 404, detail: UNLOCK_FAILURE.into() })
        );
    }
}
