// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - Para listeners en elementos del DOM: cuando el elemento se destruye (p.ej. con set_inner_html("")),
//   el navegador automáticamente limpia los listeners asociados. Por lo tanto, closure.forget() es
//   seguro para listeners locales.
// - Para listeners globales (window/document): se guarda el Closure en un `DocumentListener`
//   que hace removeEventListener al hacer drop.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, MouseEvent};
use crate::dom::document;

/// Listener en `document` que se elimina al hacer drop
pub struct DocumentListener {
    closure: Closure<dyn FnMut(KeyboardEvent)>,
    event_type: &'static str,
}

impl DocumentListener {
    /// Registrar un listener de teclado en `document`
    pub fn keydown<F>(handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(KeyboardEvent) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(KeyboardEvent)>);
        document()
            .ok_or_else(|| JsValue::from_str("No document"))?
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        Ok(Self {
            closure,
            event_type: "keydown",
        })
    }
}

impl Drop for DocumentListener {
    fn drop(&mut self) {
        if let Some(doc) = document() {
            let _ = doc.remove_event_listener_with_callback(
                self.event_type,
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Helper para crear click handler simple
/// Nota: Cuando el elemento se destruye del DOM (p.ej. con set_inner_html("")),
/// el navegador automáticamente limpia los listeners, por lo que closure.forget() es seguro.
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback(
        "click",
        closure.as_ref().unchecked_ref(),
    )?;
    closure.forget();
    Ok(())
}

/// Submit de formulario. Siempre hace prevent_default antes del handler
pub fn on_submit<F>(form: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: Event| {
        e.prevent_default();
        handler();
    }) as Box<dyn FnMut(Event)>);
    form.add_event_listener_with_callback(
        "submit",
        closure.as_ref().unchecked_ref(),
    )?;
    closure.forget();
    Ok(())
}
