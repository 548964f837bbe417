// ============================================================================
// ROUTER - Ruta actual -> vista a renderizar
// ============================================================================

use crate::services::{Navigator, TokenStore};
use crate::utils::{
    DASHBOARD_PATH, FORGOT_PASSWORD_PATH, LOGIN_PATH, REGISTER_PATH, RESET_PASSWORD_PATH, ROOT_PATH,
    UNLOCK_ACCOUNT_PATH,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Register,
    ForgotPassword,
    /// Token del enlace de correo (`?token=`)
    ResetPassword(Option<String>),
    UnlockAccount(Option<String>),
}

impl Route {
    /// Rutas que exigen sesión
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Register)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => LOGIN_PATH,
            Route::Dashboard => DASHBOARD_PATH,
            Route::Register => REGISTER_PATH,
            Route::ForgotPassword => FORGOT_PASSWORD_PATH,
            Route::ResetPassword(_) => RESET_PASSWORD_PATH,
            Route::UnlockAccount(_) => UNLOCK_ACCOUNT_PATH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(&'static str),
    /// Ruta protegida sin token bien formado
    SessionRequired,
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_PATH
    } else {
        trimmed
    }
}

/// Resolver la ruta. `has_session` es la comprobación local del token
pub fn resolve(path: &str, query_token: Option<String>, has_session: bool) -> Resolution {
    let route = match normalize(path) {
        ROOT_PATH => return Resolution::Redirect(DASHBOARD_PATH),
        LOGIN_PATH => Route::Login,
        DASHBOARD_PATH => Route::Dashboard,
        REGISTER_PATH => Route::Register,
        FORGOT_PASSWORD_PATH => Route::ForgotPassword,
        RESET_PASSWORD_PATH => Route::ResetPassword(query_token),
        UNLOCK_ACCOUNT_PATH => Route::UnlockAccount(query_token),
        other => {
            log::warn!("⚠️ [ROUTER] Ruta desconocida {}, redirigiendo al login", other);
            return Resolution::Redirect(LOGIN_PATH);
        }
    };

    if route.is_protected() && !has_session {
        return Resolution::SessionRequired;
    }
    Resolution::Render(route)
}

/// Ejecutar una resolución: la ruta a pintar, o `None` si se ha redirigido.
/// Un token mal formado se borra antes de ir al login
pub fn dispatch(resolution: Resolution, store: &dyn TokenStore, navigator: &dyn Navigator) -> Option<Route> {
    match resolution {
        Resolution::Render(route) => Some(route),
        Resolution::Redirect(target) => {
            navigator.redirect_to(target);
            None
        }
        Resolution::SessionRequired => {
            log::warn!("⚠️ [ROUTER] Sin sesión válida, limpiando token");
            store.clear();
            navigator.redirect_to(LOGIN_PATH);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryTokenStore, RecordingNavigator};

    #[test]
    fn root_goes_to_dashboard() {
        assert_eq!(resolve("/", None, true), Resolution::Redirect(DASHBOARD_PATH));
        assert_eq!(resolve("", None, false), Resolution::Redirect(DASHBOARD_PATH));
    }

    #[test]
    fn unknown_paths_go_to_login() {
        assert_eq!(resolve("/nada", None, true), Resolution::Redirect(LOGIN_PATH));
    }

    #[test]
    fn protected_routes_need_a_session() {
        assert_eq!(resolve("/dashboard", None, false), Resolution::SessionRequired);
        assert_eq!(resolve("/register", None, false), Resolution::SessionRequired);
        assert_eq!(resolve("/dashboard/", None, true), Resolution::Render(Route::Dashboard));
        assert_eq!(resolve("/register", None, true), Resolution::Render(Route::Register));
    }

    #[test]
    fn public_routes_render_without_session() {
        assert_eq!(resolve("/login", None, false), Resolution::Render(Route::Login));
        assert_eq!(resolve("/forgot-password", None, false), Resolution::Render(Route::ForgotPassword));
        assert_eq!(
            resolve("/reset-password", Some("abc".into()), false),
            Resolution::Render(Route::ResetPassword(Some("abc".into())))
        );
        assert_eq!(
            resolve("/unlock-account", None, false),
            Resolution::Render(Route::UnlockAccount(None))
        );
    }

    #[test]
    fn malformed_token_is_cleared_before_login_redirect() {
        let store = MemoryTokenStore::with_token("basura");
        let navigator = RecordingNavigator::default();

        let resolution = resolve("/dashboard", None, store.has_well_formed_token());
        let route = dispatch(resolution, &store, &navigator);

        assert_eq!(route, None);
        assert_eq!(store.get(), None);
        assert_eq!(navigator.redirects(), vec![LOGIN_PATH.to_string()]);
    }

    #[test]
    fn plain_redirects_keep_the_token() {
        let store = MemoryTokenStore::with_token("h.p.s");
        let navigator = RecordingNavigator::default();

        assert_eq!(dispatch(resolve("/", None, true), &store, &navigator), None);
        assert_eq!(store.get().as_deref(), Some("h.p.s"));
        assert_eq!(navigator.redirects(), vec![DASHBOARD_PATH.to_string()]);

        let rendered = dispatch(resolve("/login", None, true), &store, &navigator);
        assert_eq!(rendered, Some(Route::Login));
    }

    #[test]
    fn route_paths_round_trip() {
        for route in [Route::Login, Route::Dashboard, Route::Register, Route::ForgotPassword] {
            assert_eq!(resolve(route.path(), None, true), Resolution::Render(route));
        }
    }
}
