// ============================================================================
// RESET PASSWORD VIEW - Nueva contraseña desde el enlace del correo
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use std::rc::Rc;
use crate::dom::{append_child, on_submit, set_visible, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::{AccountMessage, ResetPasswordViewModel};
use crate::views::form::{input_field, message_box, show_message, submit_button};

pub fn render_reset_password(state: &AppState, token: Option<String>) -> Result<Element, JsValue> {
    log::info!("🎬 [RESET] render_reset_password() llamado");

    let page = ElementBuilder::new("div")?.class("reset-container").build();
    let card = ElementBuilder::new("div")?.class("reset-card").build();
    let title = ElementBuilder::new("h1")?
        .class("reset-title")
        .text("Restablecer Contraseña")
        .build();
    let subtitle = ElementBuilder::new("p")?
        .class("reset-subtitle")
        .text("Ingresa tu nueva contraseña para acceder a tu cuenta.")
        .build();

    let form = ElementBuilder::new("form")?.class("reset-form").build();
    let password = input_field("password", "Nueva Contraseña", "password", "")?;
    let confirm = input_field("password_confirm", "Confirmar Contraseña", "password", "")?;
    let button = submit_button("Restablecer Contraseña", "reset-button")?;
    append_child(&form, &password.group)?;
    append_child(&form, &confirm.group)?;
    append_child(&form, &button)?;

    let message = message_box("reset-message")?;

    append_child(&card, &title)?;
    append_child(&card, &subtitle)?;
    append_child(&card, &form)?;
    append_child(&card, &message)?;
    append_child(&page, &card)?;

    let vm = Rc::new(ResetPasswordViewModel::new(state.services.account.clone(), token));
    apply(&form, &message, &vm.initial());

    let form_el = form.clone();
    on_submit(&form, move || {
        let vm = vm.clone();
        let form = form_el.clone();
        let message = message.clone();
        let password = password.value();
        let confirm = confirm.value();

        apply(&form, &message, &vm.pending());
        spawn_local(async move {
            let result = vm.submit(&password, &confirm).await;
            apply(&form, &message, &result);
        });
    })?;

    Ok(page)
}

fn apply(form: &Element, message_el: &Element, state: &AccountMessage) {
    show_message(
        message_el,
        "reset-message",
        state.message.as_deref(),
        state.kind.css_class(),
    );
    set_visible(form, state.form_visible);
}
