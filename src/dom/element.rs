// ============================================================================
// ELEMENT HELPERS - Acceso al documento y visibilidad
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

/// Obtener document
pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Vaciar el contenido de un contenedor
pub fn clear_children(element: &Element) {
    element.set_inner_html("");
}

/// Agregar hijo
pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Mostrar/ocultar con el atributo `hidden`
pub fn set_visible(element: &Element, visible: bool) {
    let result = if visible {
        element.remove_attribute("hidden")
    } else {
        element.set_attribute("hidden", "")
    };
    if let Err(e) = result {
        log::warn!("⚠️ [DOM] No se pudo cambiar la visibilidad: {:?}", e);
    }
}

/// href del enlace enfocado (el que el usuario acaba de activar)
pub fn focused_link_href() -> Option<String> {
    let active = document()?.active_element()?;
    if active.tag_name().eq_ignore_ascii_case("A") {
        active.get_attribute("href")
    } else {
        None
    }
}
