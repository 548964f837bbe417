// ============================================================================
// APP - Aplicación principal
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, clear_children, get_element_by_id};
use crate::router::{dispatch, resolve};
use crate::services::navigation::current_query_param;
use crate::services::{Navigator, TokenStore};
use crate::state::AppState;
use crate::views::render_route;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;
        Ok(Self {
            state: AppState::new(),
            root,
        })
    }

    /// Renderizar la ruta actual (o redirigir)
    pub fn render(&mut self) -> Result<(), JsValue> {
        let services = &self.state.services;
        let path = services.navigator.current_path();
        let has_session = services.store.has_well_formed_token();

        let resolution = resolve(&path, current_query_param("token"), has_session);
        match dispatch(resolution, services.store.as_ref(), services.navigator.as_ref()) {
            None => {
                log::info!("➡️ [APP] {} redirigido", path);
                self.state.unmount_inactivity();
            }
            Some(route) => {
                log::info!("🎨 [APP] Renderizando {}", route.path());
                let view = render_route(&self.state, &route)?;
                clear_children(&self.root);
                append_child(&self.root, &view)?;
            }
        }
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
