// ============================================================================
// BROWSER EVENTS - Actividad del usuario y eventos de navegación
// ============================================================================
// Listeners globales (document/window) que el dashboard registra al montarse.
// A diferencia de los listeners de elementos, estos NO se limpian solos:
// se guardan los Closure para poder hacer removeEventListener.
// Protegido contra registros duplicados (attach/bind dos veces = no-op).
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, BeforeUnloadEvent, Event, PageTransitionEvent};
use crate::dom::focused_link_href;
use crate::services::navigation::{NavigationEventSource, NavigationHandlers};
use crate::utils::LEAVE_PAGE_CONFIRM;

/// Eventos que cuentan como actividad del usuario
pub const ACTIVITY_EVENTS: [&str; 7] = [
    "mousedown",
    "mousemove",
    "keypress",
    "scroll",
    "touchstart",
    "click",
    "keydown",
];

pub trait ActivityEventSource {
    fn attach(&self, on_activity: Rc<dyn Fn()>);

    /// Idempotente
    fn detach(&self);

    fn is_attached(&self) -> bool;
}

type EventClosure = Closure<dyn FnMut(Event)>;

/// Listeners de actividad en `document`, fase de captura
#[derive(Default)]
pub struct DomActivitySource {
    closure: RefCell<Option<EventClosure>>,
}

impl DomActivitySource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActivityEventSource for DomActivitySource {
    fn attach(&self, on_activity: Rc<dyn Fn()>) {
        if self.closure.borrow().is_some() {
            log::warn!("⚠️ [ACTIVITY] attach ya fue llamado, ignorando llamada duplicada");
            return;
        }
        let Some(document) = window().and_then(|w| w.document()) else {
            return;
        };

        let closure = Closure::wrap(Box::new(move |_event: Event| {
            on_activity();
        }) as Box<dyn FnMut(Event)>);

        for event in ACTIVITY_EVENTS {
            if let Err(e) = document.add_event_listener_with_callback_and_bool(
                event,
                closure.as_ref().unchecked_ref(),
                true,
            ) {
                log::error!("❌ [ACTIVITY] Error registrando '{}': {:?}", event, e);
            }
        }

        *self.closure.borrow_mut() = Some(closure);
        log::debug!("✅ [ACTIVITY] Listeners de actividad registrados");
    }

    fn detach(&self) {
        let Some(closure) = self.closure.borrow_mut().take() else {
            return;
        };
        if let Some(document) = window().and_then(|w| w.document()) {
            for event in ACTIVITY_EVENTS {
                let _ = document.remove_event_listener_with_callback_and_bool(
                    event,
                    closure.as_ref().unchecked_ref(),
                    true,
                );
            }
        }
        log::debug!("🔌 [ACTIVITY] Listeners de actividad eliminados");
    }

    fn is_attached(&self) -> bool {
        self.closure.borrow().is_some()
    }
}

impl Drop for DomActivitySource {
    fn drop(&mut self) {
        self.detach();
    }
}

struct BoundNavigation {
    page_show: Closure<dyn FnMut(PageTransitionEvent)>,
    pop_state: EventClosure,
    before_unload: Closure<dyn FnMut(BeforeUnloadEvent)>,
}

/// `pageshow`, `popstate` y `beforeunload` en `window`
#[derive(Default)]
pub struct BrowserNavigationEvents {
    bound: RefCell<Option<BoundNavigation>>,
}

impl BrowserNavigationEvents {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NavigationEventSource for BrowserNavigationEvents {
    fn bind(&self, handlers: NavigationHandlers) {
        if self.bound.borrow().is_some() {
            log::warn!("⚠️ [NAV] Guards ya registrados, ignorando llamada duplicada");
            return;
        }
        let Some(win) = window() else {
            return;
        };

        let on_page_show = Rc::clone(&handlers.on_page_show);
        let page_show = Closure::wrap(Box::new(move |event: PageTransitionEvent| {
            on_page_show(event.persisted());
        }) as Box<dyn FnMut(PageTransitionEvent)>);

        let on_pop_state = Rc::clone(&handlers.on_pop_state);
        let pop_state = Closure::wrap(Box::new(move |_event: Event| {
            let path = window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_string());
            on_pop_state(path);
        }) as Box<dyn FnMut(Event)>);

        let on_before_unload = Rc::clone(&handlers.on_before_unload);
        let before_unload = Closure::wrap(Box::new(move |event: BeforeUnloadEvent| {
            if on_before_unload(focused_link_href()) {
                event.prevent_default();
                event.set_return_value(LEAVE_PAGE_CONFIRM);
            }
        }) as Box<dyn FnMut(BeforeUnloadEvent)>);

        let _ = win.add_event_listener_with_callback("pageshow", page_show.as_ref().unchecked_ref());
        let _ = win.add_event_listener_with_callback("popstate", pop_state.as_ref().unchecked_ref());
        let _ = win.add_event_listener_with_callback("beforeunload", before_unload.as_ref().unchecked_ref());

        *self.bound.borrow_mut() = Some(BoundNavigation { page_show, pop_state, before_unload });
        log::debug!("✅ [NAV] Guards de navegación registrados");
    }

    fn unbind(&self) {
        let Some(bound) = self.bound.borrow_mut().take() else {
            return;
        };
        if let Some(win) = window() {
            let _ = win.remove_event_listener_with_callback("pageshow", bound.page_show.as_ref().unchecked_ref());
            let _ = win.remove_event_listener_with_callback("popstate", bound.pop_state.as_ref().unchecked_ref());
            let _ = win.remove_event_listener_with_callback("beforeunload", bound.before_unload.as_ref().unchecked_ref());
        }
        log::debug!("🔌 [NAV] Guards de navegación eliminados");
    }

    fn is_bound(&self) -> bool {
        self.bound.borrow().is_some()
    }
}

impl Drop for BrowserNavigationEvents {
    fn drop(&mut self) {
        self.unbind();
    }
}
