// ============================================================================
// DASHBOARD VIEW - Perfil del usuario + control de inactividad
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement};
use std::rc::Rc;
use crate::dom::{append_child, clear_children, on_click, ElementBuilder};
use crate::models::User;
use crate::state::AppState;
use crate::utils::REGISTER_PATH;
use crate::viewmodels::{DashboardLoad, DashboardViewModel, InactivityController};
use crate::views::form::link;
use crate::views::inactivity_modal::render_inactivity_modal;

/// Renderizar dashboard. El perfil se pinta cuando termina la verificación
pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [DASHBOARD] render_dashboard() llamado");

    let page = ElementBuilder::new("div")?.class("dashboard-page").build();
    let box_el = ElementBuilder::new("div")?.class("box").build();
    render_loading(&box_el)?;
    append_child(&page, &box_el)?;

    let vm = Rc::new(DashboardViewModel::new(
        state.services.auth.clone(),
        state.services.navigator.clone(),
        state.services.navigator.clone(),
    ));
    let state = state.clone();
    let page_for_modal = page.clone();
    spawn_local(async move {
        let user = match vm.load().await {
            DashboardLoad::Ready(user) => user,
            DashboardLoad::Unauthenticated => return,
        };
        state.auth.set_user(Some(user.clone()));

        let controller = state.mount_inactivity();
        let result = render_profile(&box_el, &user, &vm, &controller)
            .and_then(|_| render_inactivity_modal(&state, &controller))
            .and_then(|modal| append_child(&page_for_modal, &modal));
        if let Err(e) = result {
            log::error!("❌ [DASHBOARD] Error renderizando: {:?}", e);
        }
    });

    Ok(page)
}

fn render_loading(box_el: &Element) -> Result<(), JsValue> {
    let title = ElementBuilder::new("h1")?
        .html("Bienvenido, <span>Cargando...</span> 🌟")
        .build();
    append_child(box_el, &title)?;
    append_child(box_el, &user_info("...", "...", "user")?)?;
    Ok(())
}

fn user_info(email: &str, role_text: &str, role_class: &str) -> Result<Element, JsValue> {
    let info = ElementBuilder::new("div")?.class("user-info").build();

    let email_row = ElementBuilder::new("p")?.html("<strong>Correo:</strong> ").build();
    let email_value = ElementBuilder::new("span")?.text(email).build();
    append_child(&email_row, &email_value)?;

    let role_row = ElementBuilder::new("p")?.html("<strong>Rol:</strong> ").build();
    let role_badge = ElementBuilder::new("span")?
        .class(&format!("role-badge role-{}", role_class))
        .text(role_text)
        .build();
    append_child(&role_row, &role_badge)?;

    append_child(&info, &email_row)?;
    append_child(&info, &role_row)?;
    Ok(info)
}

fn render_profile(
    box_el: &Element,
    user: &User,
    vm: &Rc<DashboardViewModel>,
    controller: &InactivityController,
) -> Result<(), JsValue> {
    clear_children(box_el);

    let title = ElementBuilder::new("h1")?.text("Bienvenido, ").build();
    let name = ElementBuilder::new("span")?.text(user.display_name()).build();
    append_child(&title, &name)?;
    let star = ElementBuilder::new("span")?.text(" 🌟").build();
    append_child(&title, &star)?;

    let role = user.role();
    let info = user_info(&user.email, &role.as_str().to_uppercase(), role.as_str())?;

    let actions = ElementBuilder::new("div")?.class("actions").build();
    let logout_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .text("Cerrar sesión")
        .build();
    {
        let vm = vm.clone();
        let controller = controller.clone();
        let button = logout_btn.clone().dyn_into::<HtmlButtonElement>()?;
        on_click(&logout_btn, move |_| {
            if vm.request_logout(&controller) {
                button.set_disabled(true);
                button.set_text_content(Some("Cerrando sesión..."));
            }
        })?;
    }
    append_child(&actions, &logout_btn)?;

    append_child(box_el, &title)?;
    append_child(box_el, &info)?;
    append_child(box_el, &actions)?;

    if user.is_admin() {
        let admin = ElementBuilder::new("div")?.class("admin-visible").build();
        let heading = ElementBuilder::new("h3")?.text("🔧 Panel de Administrador").build();
        let admin_actions = ElementBuilder::new("div")?.class("actions").build();
        append_child(&admin_actions, &link(REGISTER_PATH, "👤 Registrar Usuarios", "")?)?;
        append_child(&admin_actions, &link("/users", "📋 Ver Todos los Usuarios", "")?)?;
        append_child(&admin, &heading)?;
        append_child(&admin, &admin_actions)?;
        append_child(box_el, &admin)?;
    }

    Ok(())
}
