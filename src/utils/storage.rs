use web_sys::{window, Storage};

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

pub fn get_session_storage() -> Option<Storage> {
    window()?.session_storage().ok()?
}

pub fn save_to_storage(key: &str, value: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage.set_item(key, value)
        .map_err(|_| "Error guardando en localStorage".to_string())?;
    Ok(())
}

pub fn load_from_storage(key: &str) -> Option<String> {
    let storage = get_local_storage()?;
    storage.get_item(key).ok()?
}

pub fn remove_from_storage(key: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage.remove_item(key)
        .map_err(|_| "Error eliminando de localStorage".to_string())?;
    Ok(())
}

/// Vaciar localStorage y sessionStorage. No falla: lo que no se pueda limpiar se loguea
pub fn clear_all_storage() {
    match get_local_storage() {
        Some(storage) => {
            if storage.clear().is_err() {
                log::error!("❌ [STORAGE] Error limpiando localStorage");
            }
        }
        None => log::warn!("⚠️ [STORAGE] localStorage no disponible"),
    }
    match get_session_storage() {
        Some(storage) => {
            if storage.clear().is_err() {
                log::error!("❌ [STORAGE] Error limpiando sessionStorage");
            }
        }
        None => log::warn!("⚠️ [STORAGE] sessionStorage no disponible"),
    }
}
