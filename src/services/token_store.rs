// ============================================================================
// TOKEN STORE - Único dueño del token bearer persistido
// ============================================================================

use crate::error::AuthError;
use crate::utils::storage::{clear_all_storage, load_from_storage, remove_from_storage, save_to_storage};

pub trait TokenStore {
    fn get(&self) -> Option<String>;

    fn set(&self, token: &str) -> Result<(), AuthError>;

    /// Borrar solo el token
    fn clear(&self);

    /// Borrar todo el estado persistido (local + session)
    fn clear_all(&self);

    /// Chequeo local barato del formato. NO es una decisión de confianza:
    /// solo `verify` contra el servidor valida el token.
    fn has_well_formed_token(&self) -> bool {
        self.get().map(|t| is_well_formed(&t)).unwrap_or(false)
    }
}

/// Tres segmentos separados por puntos (forma de JWT)
pub fn is_well_formed(token: &str) -> bool {
    token.split('.').count() == 3
}

/// Token en `localStorage`
pub struct BrowserTokenStore {
    key: String,
}

impl BrowserTokenStore {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }
}

impl TokenStore for BrowserTokenStore {
    fn get(&self) -> Option<String> {
        load_from_storage(&self.key).filter(|t| !t.is_empty())
    }

    fn set(&self, token: &str) -> Result<(), AuthError> {
        save_to_storage(&self.key, token).map_err(AuthError::Storage)?;
        log::info!("💾 [TOKEN] Token guardado");
        Ok(())
    }

    fn clear(&self) {
        if let Err(e) = remove_from_storage(&self.key) {
            log::error!("❌ [TOKEN] {}", e);
        }
    }

    fn clear_all(&self) {
        clear_all_storage();
        log::info!("🗑️ [TOKEN] Estado persistido eliminado");
    }
}
