// ============================================================================
// FORM HELPERS - Piezas comunes de los formularios de autenticación
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlInputElement, HtmlSelectElement};
use crate::dom::{append_child, create_element, set_visible, ElementBuilder};

/// Grupo label + input
pub struct Field {
    pub group: Element,
    pub input: HtmlInputElement,
}

impl Field {
    pub fn value(&self) -> String {
        self.input.value()
    }

    pub fn clear(&self) {
        self.input.set_value("");
    }
}

pub fn input_field(id: &str, label: &str, input_type: &str, placeholder: &str) -> Result<Field, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();
    let label_el = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label)
        .build();

    let input = create_element("input")?;
    input.set_attribute("type", input_type)?;
    input.set_attribute("id", id)?;
    input.set_attribute("name", id)?;
    input.set_attribute("placeholder", placeholder)?;
    input.set_attribute("required", "")?;

    append_child(&group, &label_el)?;
    append_child(&group, &input)?;

    let input = input.dyn_into::<HtmlInputElement>()?;
    Ok(Field { group, input })
}

/// Select con opciones `(value, label)` y una opción vacía inicial
pub fn select_field(
    id: &str,
    label: &str,
    placeholder: &str,
    options: &[(&str, &str)],
) -> Result<(Element, HtmlSelectElement), JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();
    let label_el = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label)
        .build();

    let select = ElementBuilder::new("select")?
        .attr("id", id)?
        .attr("name", id)?
        .attr("required", "")?
        .build();
    let empty = ElementBuilder::new("option")?
        .attr("value", "")?
        .text(placeholder)
        .build();
    append_child(&select, &empty)?;
    for (value, text) in options {
        let option = ElementBuilder::new("option")?
            .attr("value", value)?
            .text(text)
            .build();
        append_child(&select, &option)?;
    }

    append_child(&group, &label_el)?;
    append_child(&group, &select)?;
    Ok((group, select.dyn_into::<HtmlSelectElement>()?))
}

pub fn submit_button(text: &str, class: &str) -> Result<HtmlButtonElement, JsValue> {
    ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class(class)
        .text(text)
        .build()
        .dyn_into::<HtmlButtonElement>()
        .map_err(JsValue::from)
}

/// Deshabilitar el botón y cambiar su texto mientras hay una petición en curso
pub fn set_busy(button: &HtmlButtonElement, busy: bool, idle_text: &str, busy_text: &str) {
    button.set_disabled(busy);
    button.set_text_content(Some(if busy { busy_text } else { idle_text }));
}

/// Caja de mensaje; vacía = oculta
pub fn message_box(base_class: &str) -> Result<Element, JsValue> {
    let el = ElementBuilder::new("div")?.class(base_class).build();
    set_visible(&el, false);
    Ok(el)
}

pub fn show_message(el: &Element, base_class: &str, message: Option<&str>, kind_class: &str) {
    match message {
        Some(text) => {
            el.set_class_name(&format!("{} {}", base_class, kind_class));
            el.set_text_content(Some(text));
            set_visible(el, true);
        }
        None => {
            el.set_class_name(base_class);
            el.set_text_content(None);
            set_visible(el, false);
        }
    }
}

pub fn link(href: &str, text: &str, class: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("a")?
        .attr("href", href)?
        .class(class)
        .text(text)
        .build())
}
