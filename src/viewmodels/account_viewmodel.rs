// ============================================================================
// ACCOUNT VIEWMODELS - Recuperar/restablecer contraseña y desbloquear cuenta
// ============================================================================
// Páginas públicas: solicitud del enlace de recuperación y las que llegan
// desde un enlace del correo (?token=).
// Solo traducen resultados del servicio a mensajes para la vista.
// ============================================================================

use std::rc::Rc;
use crate::error::AuthError;
use crate::services::AccountService;

pub const TOKEN_MISSING: &str = "Token no encontrado. Por favor, usa el enlace completo del correo.";
pub const SERVER_UNREACHABLE: &str = "No se pudo conectar con el servidor. Por favor, inténtalo más tarde.";
pub const UNLOCK_INSTRUCTION: &str = "Haz clic en el botón para desbloquear la cuenta del usuario.";
pub const SENDING_LINK: &str = "Enviando enlace...";
pub const RESETTING: &str = "Restableciendo contraseña...";
pub const UNLOCKING: &str = "Procesando la solicitud...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

impl MessageKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageKind::Success => "message-success",
            MessageKind::Error => "message-error",
            MessageKind::Info => "message-info",
        }
    }
}

/// Estado que pinta la vista
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMessage {
    pub message: Option<String>,
    pub kind: MessageKind,
    pub form_visible: bool,
}

impl AccountMessage {
    fn idle() -> Self {
        Self { message: None, kind: MessageKind::Info, form_visible: true }
    }

    fn info(message: &str) -> Self {
        Self { message: Some(message.to_string()), kind: MessageKind::Info, form_visible: true }
    }

    fn done(message: String) -> Self {
        Self { message: Some(message), kind: MessageKind::Success, form_visible: false }
    }

    fn failed(message: String, form_visible: bool) -> Self {
        Self { message: Some(message), kind: MessageKind::Error, form_visible }
    }

    fn from_error(error: AuthError) -> Self {
        let message = if error.is_transport() {
            SERVER_UNREACHABLE.to_string()
        } else {
            error.to_string()
        };
        Self::failed(message, true)
    }
}

fn usable_token(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.trim().is_empty())
}

/// Solicitud del enlace de recuperación desde el login
pub struct ForgotPasswordViewModel {
    service: Rc<AccountService>,
}

impl ForgotPasswordViewModel {
    pub fn new(service: Rc<AccountService>) -> Self {
        Self { service }
    }

    pub fn initial(&self) -> AccountMessage {
        AccountMessage::idle()
    }

    pub fn pending(&self) -> AccountMessage {
        AccountMessage::info(SENDING_LINK)
    }

    pub async fn submit(&self, email: &str) -> AccountMessage {
        match self.service.request_password_reset(email).await {
            Ok(message) => AccountMessage::done(message),
            Err(e) => {
                log::warn!("⚠️ [FORGOT] {}", e);
                AccountMessage::from_error(e)
            }
        }
    }
}

pub struct ResetPasswordViewModel {
    service: Rc<AccountService>,
    token: Option<String>,
}

impl ResetPasswordViewModel {
    pub fn new(service: Rc<AccountService>, token: Option<String>) -> Self {
        Self { service, token: usable_token(token) }
    }

    pub fn initial(&self) -> AccountMessage {
        match self.token {
            Some(_) => AccountMessage::idle(),
            None => AccountMessage::failed(TOKEN_MISSING.to_string(), false),
        }
    }

    /// Mensaje mientras la petición está en curso
    pub fn pending(&self) -> AccountMessage {
        AccountMessage::info(RESETTING)
    }

    pub async fn submit(&self, password: &str, password_confirm: &str) -> AccountMessage {
        let Some(token) = self.token.as_deref() else {
            return self.initial();
        };
        match self.service.reset_password(token, password, password_confirm).await {
            Ok(message) => AccountMessage::done(message),
            Err(e) => {
                log::warn!("⚠️ [RESET] {}", e);
                AccountMessage::from_error(e)
            }
        }
    }
}

pub struct UnlockAccountViewModel {
    service: Rc<AccountService>,
    token: Option<String>,
}

impl UnlockAccountViewModel {
    pub fn new(service: Rc<AccountService>, token: Option<String>) -> Self {
        Self { service, token: usable_token(token) }
    }

    pub fn initial(&self) -> AccountMessage {
        match self.token {
            Some(_) => AccountMessage::info(UNLOCK_INSTRUCTION),
            None => AccountMessage::failed(TOKEN_MISSING.to_string(), false),
        }
    }

    pub fn pending(&self) -> AccountMessage {
        AccountMessage::info(UNLOCKING)
    }

    pub async fn unlock(&self) -> AccountMessage {
        let Some(token) = self.token.as_deref() else {
            return self.initial();
        };
        match self.service.unlock_account(token).await {
            Ok(message) => AccountMessage::done(message),
            Err(e) => {
                log::warn!("⚠️ [UNLOCK] {}", e);
                AccountMessage::from_error(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::account_service::{FORGOT_SENT, INVALID_EMAIL, PASSWORD_MISMATCH, RESET_SUCCESS};
    use crate::testing::FakeTransport;
    use futures::executor::block_on;

    fn service() -> (Rc<FakeTransport>, Rc<AccountService>) {
        let transport = Rc::new(FakeTransport::default());
        (transport.clone(), Rc::new(AccountService::new(transport)))
    }

    #[test]
    fn missing_token_hides_the_form() {
        let (_, service) = service();
        let reset = ResetPasswordViewModel::new(service.clone(), None);
        let unlock = UnlockAccountViewModel::new(service, Some("  ".into()));

        for state in [reset.initial(), unlock.initial()] {
            assert_eq!(state.kind, MessageKind::Error);
            assert_eq!(state.message.as_deref(), Some(TOKEN_MISSING));
            assert!(!state.form_visible);
        }
    }

    #[test]
    fn forgot_password_confirms_and_hides_form() {
        let (transport, service) = service();
        transport.reply_json(200, "{}");
        let vm = ForgotPasswordViewModel::new(service);
        assert!(vm.initial().form_visible);

        let state = block_on(vm.submit("ana@docs.io"));

        assert_eq!(state, AccountMessage::done(FORGOT_SENT.to_string()));
    }

    #[test]
    fn forgot_password_invalid_email_keeps_form_open() {
        let (transport, service) = service();
        let vm = ForgotPasswordViewModel::new(service);

        let state = block_on(vm.submit("ana"));

        assert_eq!(state, AccountMessage::failed(INVALID_EMAIL.into(), true));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn reset_success_hides_form() {
        let (transport, service) = service();
        transport.reply_json(200, "{}");
        let vm = ResetPasswordViewModel::new(service, Some("tok".into()));

        let state = block_on(vm.submit("nueva", "nueva"));

        assert_eq!(state, AccountMessage::done(RESET_SUCCESS.to_string()));
    }

    #[test]
    fn reset_mismatch_keeps_form_open() {
        let (transport, service) = service();
        let vm = ResetPasswordViewModel::new(service, Some("tok".into()));

        let state = block_on(vm.submit("uno", "dos"));

        assert_eq!(state.kind, MessageKind::Error);
        assert_eq!(state.message.as_deref(), Some(PASSWORD_MISMATCH));
        assert!(state.form_visible);
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn unreachable_server_gets_friendly_message() {
        let (transport, service) = service();
        transport.reply_error("offline");
        let vm = UnlockAccountViewModel::new(service, Some("tok".into()));

        let state = block_on(vm.unlock());

        assert_eq!(state.message.as_deref(), Some(SERVER_UNREACHABLE));
        assert!(state.form_visible);
    }

    #[test]
    fn unlock_failure_shows_server_detail() {
        let (transport, service) = service();
        transport.reply_json(400, r#"{"detail":"Token inválido"}"#);
        let vm = UnlockAccountViewModel::new(service, Some("tok".into()));

        let state = block_on(vm.unlock());

        assert_eq!(state, AccountMessage::failed("Token inválido".into(), true));
    }
}
