// ============================================================================
// APP VIEW - Ruta resuelta -> vista
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::router::Route;
use crate::state::AppState;
use crate::views::{
    render_dashboard, render_forgot_password, render_login, render_register, render_reset_password,
    render_unlock_account,
};

/// Renderizar la vista de una ruta
pub fn render_route(state: &AppState, route: &Route) -> Result<Element, JsValue> {
    // Solo el dashboard mantiene el controlador de inactividad montado
    if *route != Route::Dashboard {
        state.unmount_inactivity();
    }

    match route {
        Route::Login => render_login(state),
        Route::Dashboard => render_dashboard(state),
        Route::Register => render_register(state),
        Route::ForgotPassword => render_forgot_password(state),
        Route::ResetPassword(token) => render_reset_password(state, token.clone()),
        Route::UnlockAccount(token) => render_unlock_account(state, token.clone()),
    }
}
