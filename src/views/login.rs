// ============================================================================
// LOGIN VIEW - Formulario de acceso
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use std::rc::Rc;
use crate::dom::{append_child, on_submit, ElementBuilder};
use crate::router::Route;
use crate::state::AppState;
use crate::viewmodels::LoginViewModel;
use crate::views::form::{input_field, link, message_box, set_busy, show_message, submit_button};

const BUTTON_TEXT: &str = "Iniciar sesión";
const BUTTON_BUSY: &str = "Ingresando...";

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_login() llamado");

    let page = ElementBuilder::new("div")?.class("auth-page").build();
    let card = ElementBuilder::new("div")?.class("card").build();
    let title = ElementBuilder::new("h2")?.text("Iniciar sesión").build();

    let form = ElementBuilder::new("form")?.class("auth-form").build();
    let email = input_field("email", "Email", "email", "tu@empresa.com")?;
    let password = input_field("password", "Contraseña", "password", "Tu contraseña")?;
    let error = message_box("form-message")?;
    let button = submit_button(BUTTON_TEXT, "btn-primary")?;

    append_child(&form, &email.group)?;
    append_child(&form, &password.group)?;
    append_child(&form, &error)?;
    append_child(&form, &button)?;

    let vm = Rc::new(LoginViewModel::new(
        state.services.auth.clone(),
        state.services.navigator.clone(),
    ));
    let email_input = email.input.clone();
    let password_input = password.input.clone();
    let error_box = error.clone();
    on_submit(&form, move || {
        let vm = vm.clone();
        let email = email_input.value();
        let password = password_input.value();
        let error_box = error_box.clone();
        let button = button.clone();

        show_message(&error_box, "form-message", None, "");
        set_busy(&button, true, BUTTON_TEXT, BUTTON_BUSY);
        spawn_local(async move {
            if let Err(e) = vm.submit(&email, &password).await {
                log::warn!("⚠️ [LOGIN] {}", e);
                show_message(&error_box, "form-message", Some(&e.to_string()), "message-error");
                set_busy(&button, false, BUTTON_TEXT, BUTTON_BUSY);
            }
        });
    })?;

    append_child(&card, &title)?;
    append_child(&card, &form)?;

    let recovery = ElementBuilder::new("p")?.class("auth-footer").text("¿Olvidaste la contraseña? ").build();
    append_child(&recovery, &link(Route::ForgotPassword.path(), "Click aquí", "")?)?;
    append_child(&card, &recovery)?;
    append_child(&page, &card)?;
    Ok(page)
}
