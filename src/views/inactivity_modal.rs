// ============================================================================
// INACTIVITY MODAL - Aviso de sesión por expirar
// ============================================================================
// Se pinta una vez y se actualiza con los snapshots del controlador
// (visibilidad + contador), sin re-render del dashboard.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, KeyboardEvent};
use crate::dom::{append_child, on_click, set_visible, DocumentListener, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::{InactivityController, InactivitySnapshot};

pub fn render_inactivity_modal(state: &AppState, controller: &InactivityController) -> Result<Element, JsValue> {
    let modal = ElementBuilder::new("div")?.class("inactivity-modal").build();
    let content = ElementBuilder::new("div")?.class("inactivity-content").build();

    let title = ElementBuilder::new("h2")?.text("⏰ Sesión por Expirar").build();
    let line1 = ElementBuilder::new("p")?.text("Has estado inactivo por mucho tiempo.").build();
    let line2 = ElementBuilder::new("p")?.text("Tu sesión expirará en:").build();
    let countdown = ElementBuilder::new("div")?
        .class("countdown")
        .text(&controller.snapshot().countdown_display)
        .build();
    let question = ElementBuilder::new("p")?
        .html("<small>¿Deseas continuar trabajando?</small>")
        .build();

    let buttons = ElementBuilder::new("div")?.class("modal-buttons").build();
    let extend_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-extend")
        .text("Continuar Sesión")
        .build();
    let logout_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-logout")
        .text("Cerrar Sesión")
        .build();

    {
        let controller = controller.clone();
        on_click(&extend_btn, move |_| controller.extend_session())?;
    }
    {
        let controller = controller.clone();
        on_click(&logout_btn, move |_| controller.logout())?;
    }

    // Escape = "Continuar Sesión" mientras el aviso está visible
    {
        let controller = controller.clone();
        let listener = DocumentListener::keydown(move |event: KeyboardEvent| {
            if event.key() == "Escape" && controller.snapshot().warning_visible {
                controller.extend_session();
            }
        })?;
        state.keep_page_listener(listener);
    }

    append_child(&buttons, &extend_btn)?;
    append_child(&buttons, &logout_btn)?;
    append_child(&content, &title)?;
    append_child(&content, &line1)?;
    append_child(&content, &line2)?;
    append_child(&content, &countdown)?;
    append_child(&content, &question)?;
    append_child(&content, &buttons)?;
    append_child(&modal, &content)?;

    apply_snapshot(&modal, &countdown, &controller.snapshot());
    {
        let modal = modal.clone();
        controller.subscribe(move |snapshot| apply_snapshot(&modal, &countdown, snapshot));
    }

    Ok(modal)
}

fn apply_snapshot(modal: &Element, countdown: &Element, snapshot: &InactivitySnapshot) {
    countdown.set_text_content(Some(&snapshot.countdown_display));
    set_visible(modal, snapshot.warning_visible);
}
