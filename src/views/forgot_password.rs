// ============================================================================
// FORGOT PASSWORD VIEW - Solicitar el enlace de recuperación
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use std::rc::Rc;
use crate::dom::{append_child, on_submit, set_visible, ElementBuilder};
use crate::router::Route;
use crate::state::AppState;
use crate::viewmodels::{AccountMessage, ForgotPasswordViewModel};
use crate::views::form::{input_field, link, message_box, show_message, submit_button};

pub fn render_forgot_password(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [FORGOT] render_forgot_password() llamado");

    let page = ElementBuilder::new("div")?.class("reset-container").build();
    let card = ElementBuilder::new("div")?.class("reset-card").build();
    let title = ElementBuilder::new("h1")?
        .class("reset-title")
        .text("Recuperar Contraseña")
        .build();
    let subtitle = ElementBuilder::new("p")?
        .class("reset-subtitle")
        .text("Te enviaremos un enlace para restablecer tu contraseña.")
        .build();

    let form = ElementBuilder::new("form")?.class("reset-form").build();
    let email = input_field("email", "Correo electrónico", "email", "tu@empresa.com")?;
    let button = submit_button("Enviar enlace", "reset-button")?;
    append_child(&form, &email.group)?;
    append_child(&form, &button)?;

    let message = message_box("reset-message")?;

    append_child(&card, &title)?;
    append_child(&card, &subtitle)?;
    append_child(&card, &form)?;
    append_child(&card, &message)?;
    append_child(&card, &link(Route::Login.path(), "Volver al login", "link-back")?)?;
    append_child(&page, &card)?;

    let vm = Rc::new(ForgotPasswordViewModel::new(state.services.account.clone()));
    apply(&form, &message, &vm.initial());

    let form_el = form.clone();
    on_submit(&form, move || {
        let vm = vm.clone();
        let form = form_el.clone();
        let message = message.clone();
        let email = email.value();

        apply(&form, &message, &vm.pending());
        spawn_local(async move {
            let result = vm.submit(&email).await;
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
