// ============================================================================
// UNLOCK ACCOUNT VIEW - Desbloqueo desde el enlace del correo
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use std::rc::Rc;
use crate::dom::{append_child, on_click, set_visible, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::{MessageKind, UnlockAccountViewModel};
use crate::views::form::{message_box, show_message};

pub fn render_unlock_account(state: &AppState, token: Option<String>) -> Result<Element, JsValue> {
    log::info!("🎬 [UNLOCK] render_unlock_account() llamado");

    let page = ElementBuilder::new("div")?.class("unlock-container").build();
    let card = ElementBuilder::new("div")?.class("unlock-card").build();
    let title = ElementBuilder::new("h1")?
        .class("unlock-title")
        .text("Desbloquear Cuenta")
        .build();
    let instruction = ElementBuilder::new("p")?.class("unlock-subtitle").build();
    let button = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("unlock-button")
        .text("Desbloquear Cuenta")
        .build();
    let message = message_box("unlock-message")?;

    append_child(&card, &title)?;
    append_child(&card, &instruction)?;
    append_child(&card, &button)?;
    append_child(&card, &message)?;
    append_child(&page, &card)?;

    let vm = Rc::new(UnlockAccountViewModel::new(state.services.account.clone(), token));
    let initial = vm.initial();
    // Sin token el error va en la caja de mensajes; con token, la instrucción
    if initial.kind == MessageKind::Error {
        show_message(&message, "unlock-message", initial.message.as_deref(), initial.kind.css_class());
    } else {
        instruction.set_text_content(initial.message.as_deref());
    }
    set_visible(&button, initial.form_visible);

    let button_el = button.clone();
    on_click(&button, move |_| {
        let vm = vm.clone();
        let button = button_el.clone();
        let message = message.clone();
        let instruction = instruction.clone();

        let pending = vm.pending();
        show_message(&message, "unlock-message", pending.message.as_deref(), pending.kind.css_class());
        let _ = button.set_attribute("disabled", "");
        spawn_local(async move {
            let result = vm.unlock().await;
            show_message(&message, "unlock-message", result.message.as_deref(), result.kind.css_class());
            if result.kind == MessageKind::Success {
                instruction.set_text_content(Some("La cuenta ha sido desbloqueada."));
            }
            let _ = button.remove_attribute("disabled");
            set_visible(&button, result.form_visible);
        });
    })?;

    Ok(page)
}
