// ============================================================================
// REGISTER VIEW - Alta de usuarios (solo administradores)
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use std::rc::Rc;
use crate::dom::{append_child, clear_children, on_submit, ElementBuilder};
use crate::models::{RegisterData, Role};
use crate::services::Notifier;
use crate::state::AppState;
use crate::utils::DASHBOARD_PATH;
use crate::viewmodels::{RegisterAccess, RegisterViewModel};
use crate::views::form::{input_field, link, message_box, select_field, set_busy, show_message, submit_button};

const BUTTON_TEXT: &str = "Registrar";
const BUTTON_BUSY: &str = "Registrando...";

/// Renderizar vista de registro. El contenido llega tras comprobar permisos
pub fn render_register(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [REGISTER] render_register() llamado");

    let page = ElementBuilder::new("div")?.class("auth-page").build();
    let card = ElementBuilder::new("div")?.class("card").build();
    let title = ElementBuilder::new("h2")?.text("Crear cuenta").build();
    let body = ElementBuilder::new("div")?
        .class("card-body")
        .text("Verificando permisos...")
        .build();
    append_child(&card, &title)?;
    append_child(&card, &body)?;
    append_child(&page, &card)?;

    let vm = Rc::new(RegisterViewModel::new(
        state.services.auth.clone(),
        state.services.navigator.clone(),
        state.services.timers.clone(),
        state.services.error_dismiss_ms,
    ));
    let state = state.clone();
    spawn_local(async move {
        match vm.load().await {
            RegisterAccess::Granted(user) => {
                state.auth.set_user(Some(user));
                if let Err(e) = render_form(&state, &body, vm) {
                    log::error!("❌ [REGISTER] Error renderizando formulario: {:?}", e);
                }
            }
            RegisterAccess::Denied => {
                if let Err(e) = render_denied(&body) {
                    log::error!("❌ [REGISTER] Error renderizando acceso denegado: {:?}", e);
                }
            }
            RegisterAccess::Unauthenticated => {}
        }
    });

    Ok(page)
}

fn render_denied(body: &Element) -> Result<(), JsValue> {
    clear_children(body);
    let message = ElementBuilder::new("p")?
        .class("form-message message-error")
        .text(RegisterViewModel::denied_message())
        .build();
    append_child(body, &message)?;
    append_child(body, &link(DASHBOARD_PATH, "Volver al Dashboard", "link-back")?)?;
    Ok(())
}

fn render_form(state: &AppState, body: &Element, vm: Rc<RegisterViewModel>) -> Result<(), JsValue> {
    clear_children(body);

    let form = ElementBuilder::new("form")?.class("auth-form").build();
    let name = input_field("name", "Nombre", "text", "Nombre completo")?;
    let email = input_field("email", "Email", "email", "usuario@empresa.com")?;
    let password = input_field("password", "Contraseña", "password", "Contraseña inicial")?;
    let department = input_field("department_name", "Departamento", "text", "Nombre del departamento")?;
    let roles: Vec<(&str, &str)> = Role::ALL.iter().map(|r| (r.as_str(), r.label())).collect();
    let (role_group, role) = select_field("rol", "Rol", "Selecciona un rol", &roles)?;
    let error = message_box("form-message")?;
    let button = submit_button(BUTTON_TEXT, "btn-primary")?;

    append_child(&form, &name.group)?;
    append_child(&form, &email.group)?;
    append_child(&form, &password.group)?;
    append_child(&form, &department.group)?;
    append_child(&form, &role_group)?;
    append_child(&form, &error)?;
    append_child(&form, &button)?;
    append_child(body, &form)?;
    append_child(body, &link(DASHBOARD_PATH, "Volver al Dashboard", "link-back")?)?;

    // El viewmodel publica el error y lo retira al vencer el auto-cierre
    {
        let error = error.clone();
        vm.subscribe_error(move |message| {
            show_message(&error, "form-message", message.as_deref(), "message-error");
        });
    }

    let fields = Rc::new([name, email, password, department]);
    let notifier = state.services.navigator.clone();

    on_submit(&form, move || {
        let [name, email, password, department] = &*fields;
        let data = RegisterData {
            name: name.value(),
            email: email.value(),
            password: password.value(),
            department_name: department.value(),
            rol: role.value(),
        };

        let vm = vm.clone();
        let fields = fields.clone();
        let role = role.clone();
        let button = button.clone();
        let notifier = notifier.clone();

        set_busy(&button, true, BUTTON_TEXT, BUTTON_BUSY);
        spawn_local(async move {
            if let Ok(message) = vm.submit(&data).await {
                notifier.show_notice(message);
                fields.iter().for_each(|f| f.clear());
                role.set_value("");
            }
            set_busy(&button, false, BUTTON_TEXT, BUTTON_BUSY);
        });
    })?;

    Ok(())
}
