// ============================================================================
// NAVIGATION - Abstracción sobre window.location y diálogos del navegador
// ============================================================================

use std::rc::Rc;
use web_sys::window;

pub trait Navigator {
    /// Ruta actual (pathname)
    fn current_path(&self) -> String;

    /// Navegación completa reemplazando la entrada del historial
    fn redirect_to(&self, path: &str);

    fn reload(&self);
}

/// Diálogos bloqueantes
pub trait Notifier {
    fn show_notice(&self, message: &str);

    fn confirm(&self, message: &str) -> bool;
}

/// Handlers que la página registra mientras el dashboard está montado
#[derive(Clone)]
pub struct NavigationHandlers {
    /// `pageshow`; el argumento es `event.persisted`
    pub on_page_show: Rc<dyn Fn(bool)>,
    /// `popstate`; el argumento es el pathname resultante
    pub on_pop_state: Rc<dyn Fn(String)>,
    /// `beforeunload`; recibe el href del enlace enfocado (si lo hay) y
    /// devuelve `true` si hay que pedir confirmación
    pub on_before_unload: Rc<dyn Fn(Option<String>) -> bool>,
}

pub trait NavigationEventSource {
    fn bind(&self, handlers: NavigationHandlers);

    /// Idempotente
    fn unbind(&self);

    fn is_bound(&self) -> bool;
}

pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    fn redirect_to(&self, path: &str) {
        log::info!("➡️ [NAV] Redirigiendo a {}", path);
        if let Some(win) = window() {
            if let Err(e) = win.location().replace(path) {
                log::error!("❌ [NAV] Error redirigiendo a {}: {:?}", path, e);
            }
        }
    }

    fn reload(&self) {
        if let Some(win) = window() {
            if let Err(e) = win.location().reload() {
                log::error!("❌ [NAV] Error recargando: {:?}", e);
            }
        }
    }
}

impl Notifier for BrowserNavigator {
    fn show_notice(&self, message: &str) {
        if let Some(win) = window() {
            let _ = win.alert_with_message(message);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// Valor del parámetro `name` en la query string actual
pub fn current_query_param(name: &str) -> Option<String> {
    let search = window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name).filter(|v| !v.is_empty())
}
