// ============================================================================
// DOCSFLOW WEB - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI (incluye el controlador de inactividad)
// - Services: API, token, timers y eventos del navegador detrás de traits
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod viewmodels;
pub mod state;
pub mod router;
mod dom;
mod views;
pub mod utils;
mod app;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;
use crate::app::App;
use crate::config::CONFIG;
use std::cell::RefCell;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 DocsFlow Web - Rust Puro + MVVM ({})", CONFIG.environment);

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Re-render completo de la ruta actual
pub fn rerender_app() {
    APP.with(|app_cell| {
        if let Some(ref mut app) = *app_cell.borrow_mut() {
            if let Err(e) = app.render() {
                log::error!("❌ Error re-renderizando: {:?}", e);
            }
        } else {
            log::warn!("⚠️ [RERENDER] App no está inicializada");
        }
    });
}

/// Función pública WASM para re-renderizar la app (llamable desde JavaScript)
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}

/// Usuario cargado en la página actual (JSON), para depuración desde la consola
#[wasm_bindgen]
pub fn current_user_json() -> Option<String> {
    APP.with(|app_cell| {
        let app = app_cell.borrow();
        let user = app.as_ref()?.state().auth.get_user()?;
        serde_json::to_string(&user).ok()
    })
}
