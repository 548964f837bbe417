// ============================================================================
// AUTH CLIENT - Login, verificación, registro y logout contra el API
// ============================================================================
// Único punto de acceso a los endpoints de autenticación. Cualquier 401 en una
// llamada autenticada limpia el token y programa la vuelta al login.
// ============================================================================

use async_trait::async_trait;
use std::rc::Rc;
use crate::error::{AuthError, GENERIC_CREDENTIALS_MESSAGE, GENERIC_PERMISSION_MESSAGE};
use crate::models::{
    DashboardResponse, LoginOutcome, LoginRequest, LoginResponse, RegisterData, User, VerifyResponse,
};
use crate::services::http::{ApiRequest, ApiResponse, HttpTransport};
use crate::services::navigation::Navigator;
use crate::services::scheduler::TimerScheduler;
use crate::services::token_store::TokenStore;
use crate::utils::{API_DASHBOARD, API_LOGIN, API_LOGOUT, API_REGISTER, API_VERIFY, DASHBOARD_PATH, LOGIN_PATH};

/// Cierre de sesión en el servidor + limpieza local. Nunca falla
#[async_trait(?Send)]
pub trait SessionEnder {
    async fn end_session(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Valid,
    /// No hay token que verificar
    NoToken,
    /// 401: token limpiado y redirección ya programada
    Unauthorized,
    /// Otro status no-2xx
    Rejected,
    /// Error de red
    Unreachable,
}

impl VerifyOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerifyOutcome::Valid)
    }
}

pub struct AuthClient {
    transport: Rc<dyn HttpTransport>,
    store: Rc<dyn TokenStore>,
    navigator: Rc<dyn Navigator>,
    timers: Rc<dyn TimerScheduler>,
    unauthorized_redirect_delay_ms: u32,
}

impl AuthClient {
    pub fn new(
        transport: Rc<dyn HttpTransport>,
        store: Rc<dyn TokenStore>,
        navigator: Rc<dyn Navigator>,
        timers: Rc<dyn TimerScheduler>,
        unauthorized_redirect_delay_ms: u32,
    ) -> Self {
        Self {
            transport,
            store,
            navigator,
            timers,
            unauthorized_redirect_delay_ms,
        }
    }

    pub fn token_store(&self) -> Rc<dyn TokenStore> {
        Rc::clone(&self.store)
    }

    /// POST /login (form-encoded). Guarda el token y devuelve el destino
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        log::info!("🔐 [AUTH] Login para {}", email);
        let credentials = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .transport
            .send(ApiRequest::post(API_LOGIN).form(credentials.form_fields()))
            .await?;

        if !response.ok() {
            let detail = response
                .detail()
                .unwrap_or_else(|| GENERIC_CREDENTIALS_MESSAGE.to_string());
            log::warn!("⚠️ [AUTH] Login rechazado ({}): {}", response.status, detail);
            return Err(AuthError::InvalidCredentials(detail));
        }

        let body: LoginResponse = response.json()?;
        if body.access_token.is_empty() {
            return Err(AuthError::MalformedResponse("access_token vacío".to_string()));
        }
        self.store.set(&body.access_token)?;

        let redirect_url = body
            .redirect_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DASHBOARD_PATH.to_string());
        log::info!("✅ [AUTH] Login correcto, destino {}", redirect_url);
        Ok(LoginOutcome { redirect_url })
    }

    /// GET /verify-auth. Cualquier fallo es `false`
    pub async fn verify(&self, token: Option<&str>) -> bool {
        self.verify_detailed(token).await.is_valid()
    }

    pub async fn verify_detailed(&self, token: Option<&str>) -> VerifyOutcome {
        let token = match token.map(str::to_string).or_else(|| self.store.get()) {
            Some(t) => t,
            None => return VerifyOutcome::NoToken,
        };

        match self.transport.send(ApiRequest::get(API_VERIFY).bearer(&token)).await {
            Ok(response) if response.ok() => VerifyOutcome::Valid,
            Ok(response) if response.status == 401 => {
                self.handle_unauthorized();
                VerifyOutcome::Unauthorized
            }
            Ok(response) => {
                log::warn!("⚠️ [AUTH] verify-auth respondió {}", response.status);
                VerifyOutcome::Rejected
            }
            Err(e) => {
                log::warn!("⚠️ [AUTH] Token verification error: {}", e);
                VerifyOutcome::Unreachable
            }
        }
    }

    /// Perfil del usuario: JSON de /dashboard o, si llega HTML, el usuario de /verify-auth
    pub async fn fetch_profile(&self) -> Result<User, AuthError> {
        let response = self.authorized(ApiRequest::get(API_DASHBOARD)).await?;
        if !response.ok() {
            return Err(rejected(&response, "Error cargando el dashboard"));
        }

        if response.is_json() {
            return Ok(response.json::<DashboardResponse>()?.user);
        }

        log::warn!("⚠️ [AUTH] /dashboard devolvió {:?}, usando /verify-auth", response.content_type);
        let verify = self.authorized(ApiRequest::get(API_VERIFY)).await?;
        if !verify.ok() {
            return Err(rejected(&verify, "Error verificando la sesión"));
        }
        verify
            .json::<VerifyResponse>()?
            .user
            .ok_or_else(|| AuthError::MalformedResponse("respuesta sin usuario".to_string()))
    }

    /// POST /register (multipart). Solo administradores
    pub async fn register(&self, data: &RegisterData) -> Result<(), AuthError> {
        log::info!("👤 [AUTH] Registrando usuario {}", data.email);
        let response = self
            .authorized(ApiRequest::post(API_REGISTER).multipart(data.form_fields()))
            .await?;

        match response.status {
            status if (200..300).contains(&status) => {
                log::info!("✅ [AUTH] Usuario {} registrado", data.email);
                Ok(())
            }
            403 => Err(AuthError::PermissionDenied(
                response
                    .detail()
                    .unwrap_or_else(|| GENERIC_PERMISSION_MESSAGE.to_string()),
            )),
            _ => Err(rejected(&response, "Error al registrar usuario")),
        }
    }

    /// GET /logout best-effort y limpieza local incondicional
    pub async fn logout(&self) {
        if let Some(token) = self.store.get() {
            match self.transport.send(ApiRequest::get(API_LOGOUT).bearer(&token)).await {
                Ok(response) if !response.ok() => {
                    log::warn!("⚠️ [AUTH] /logout respondió {}", response.status);
                }
                Ok(_) => log::info!("👋 [AUTH] Logout en servidor completado"),
                Err(e) => log::error!("❌ [AUTH] Error during logout: {}", e),
            }
        }
        self.store.clear_all();
    }

    /// Añade el bearer y aplica la política de 401
    async fn authorized(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        let token = self.store.get().ok_or(AuthError::MissingToken)?;
        let response = self.transport.send(request.bearer(&token)).await?;
        if response.status == 401 {
            self.handle_unauthorized();
            return Err(AuthError::Unauthorized);
        }
        Ok(response)
    }

    fn handle_unauthorized(&self) {
        log::warn!(
            "🔒 [AUTH] 401: limpiando token, login en {} ms",
            self.unauthorized_redirect_delay_ms
        );
        self.store.clear();
        let navigator = Rc::clone(&self.navigator);
        self.timers.set_timeout(
            self.unauthorized_redirect_delay_ms,
            Box::new(move || navigator.redirect_to(LOGIN_PATH)),
        );
    }
}

fn rejected(response: &ApiResponse, fallback: &str) -> AuthError {
    AuthError::Rejected {
        status: response.status,
        detail: response.detail().unwrap_or_else(|| fallback.to_string()),
    }
}

#[async_trait(?Send)]
impl SessionEnder for AuthClient {
    async fn end_session(&self) {
        self.logout().await;
    }
}
