// ============================================================================
// AUTH VIEWMODELS - Login y registro de usuarios
// ============================================================================
// Lógica de negocio de las pantallas de login/registro - SIN DOM.
// Devuelven valores; las vistas deciden cómo pintarlos.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use crate::error::{AuthError, GENERIC_PERMISSION_MESSAGE};
use crate::models::{RegisterData, User};
use crate::services::{AuthClient, Navigator, TimerId, TimerScheduler, VerifyOutcome};
use crate::state::ReactiveState;
use crate::utils::{LOGIN_PATH, REGISTER_SUCCESS};

pub const MISSING_FIELDS: &str = "Por favor, completa todos los campos";

/// ViewModel de login
pub struct LoginViewModel {
    client: Rc<AuthClient>,
    navigator: Rc<dyn Navigator>,
}

impl LoginViewModel {
    pub fn new(client: Rc<AuthClient>, navigator: Rc<dyn Navigator>) -> Self {
        Self { client, navigator }
    }

    /// Login y navegación al destino que indique el servidor
    pub async fn submit(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(MISSING_FIELDS.to_string()));
        }

        let outcome = self.client.login(email, password).await?;
        self.navigator.redirect_to(&outcome.redirect_url);
        Ok(outcome.redirect_url)
    }
}

/// Resultado de comprobar el acceso al formulario de registro
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterAccess {
    Granted(User),
    /// Sesión válida pero sin rol de administrador
    Denied,
    /// Redirección al login ya en marcha
    Unauthenticated,
}

/// ViewModel de registro (solo administradores)
pub struct RegisterViewModel {
    client: Rc<AuthClient>,
    navigator: Rc<dyn Navigator>,
    timers: Rc<dyn TimerScheduler>,
    error_dismiss_ms: u32,
    /// Error visible en el formulario
    error: ReactiveState<Option<String>>,
    /// Auto-cierre del error visible; un error nuevo cancela el anterior
    dismiss_timer: Rc<Cell<Option<TimerId>>>,
}

impl RegisterViewModel {
    pub fn new(
        client: Rc<AuthClient>,
        navigator: Rc<dyn Navigator>,
        timers: Rc<dyn TimerScheduler>,
        error_dismiss_ms: u32,
    ) -> Self {
        Self {
            client,
            navigator,
            timers,
            error_dismiss_ms,
            error: ReactiveState::new(None),
            dismiss_timer: Rc::new(Cell::new(None)),
        }
    }

    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    pub fn subscribe_error<F>(&self, callback: F)
    where
        F: Fn(&Option<String>) + 'static,
    {
        self.error.subscribe(callback);
    }

    pub fn denied_message() -> &'static str {
        GENERIC_PERMISSION_MESSAGE
    }

    pub async fn load(&self) -> RegisterAccess {
        let store = self.client.token_store();
        if !store.has_well_formed_token() {
            log::warn!("⚠️ [REGISTER] Sin token válido, redirigiendo al login");
            store.clear();
            self.navigator.redirect_to(LOGIN_PATH);
            return RegisterAccess::Unauthenticated;
        }

        match self.client.verify_detailed(None).await {
            VerifyOutcome::Valid => {}
            VerifyOutcome::Unauthorized => return RegisterAccess::Unauthenticated,
            other => {
                log::warn!("⚠️ [REGISTER] Verificación fallida: {:?}", other);
                self.navigator.redirect_to(LOGIN_PATH);
                return RegisterAccess::Unauthenticated;
            }
        }

        match self.client.fetch_profile().await {
            Ok(user) if user.is_admin() => {
                log::info!("✅ [REGISTER] Acceso concedido a {}", user.email);
                RegisterAccess::Granted(user)
            }
            Ok(user) => {
                log::warn!("🚫 [REGISTER] {} no es administrador", user.email);
                RegisterAccess::Denied
            }
            Err(e) if e.is_authorization_failure() => RegisterAccess::Unauthenticated,
            Err(e) => {
                log::error!("❌ [REGISTER] No se pudo comprobar el rol: {}", e);
                RegisterAccess::Denied
            }
        }
    }

    /// Devuelve el mensaje de éxito. Un error queda publicado en `error()`
    /// hasta que pasa `error_dismiss_ms` o llega otro envío
    pub async fn submit(&self, data: &RegisterData) -> Result<&'static str, AuthError> {
        self.clear_error();
        let result = self.send(data).await;
        if let Err(e) = &result {
            log::warn!("⚠️ [REGISTER] {}", e);
            self.show_error(e.to_string());
        }
        result
    }

    async fn send(&self, data: &RegisterData) -> Result<&'static str, AuthError> {
        data.validate().map_err(AuthError::Validation)?;
        self.client.register(data).await?;
        Ok(REGISTER_SUCCESS)
    }

    fn show_error(&self, message: String) {
        self.cancel_dismiss();
        self.error.set(Some(message));

        let error = self.error.clone();
        let slot = Rc::clone(&self.dismiss_timer);
        let id = self.timers.set_timeout(
            self.error_dismiss_ms,
            Box::new(move || {
                slot.set(None);
                error.set(None);
            }),
        );
        self.dismiss_timer.set(Some(id));
    }

    fn clear_error(&self) {
        self.cancel_dismiss();
        if self.error.get().is_some() {
            self.error.set(None);
        }
    }

    fn cancel_dismiss(&self) {
        if let Some(id) = self.dismiss_timer.take() {
            self.timers.cancel(id);
        }
    }
}
