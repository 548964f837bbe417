// ============================================================================
// AUTH STATE - Usuario autenticado de la página actual
// ============================================================================

use crate::models::User;
use crate::state::ReactiveState;

/// Perfil cargado por el dashboard o el registro. Nunca se persiste:
/// el único dato de sesión en storage es el token
#[derive(Clone)]
pub struct AuthState {
    pub user: ReactiveState<Option<User>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            user: ReactiveState::new(None),
        }
    }

    pub fn set_user(&self, user: Option<User>) {
        self.user.set(user);
    }

    pub fn get_user(&self) -> Option<User> {
        self.user.get()
    }

    pub fn is_admin(&self) -> bool {
        self.get_user().is_some_and(|u| u.is_admin())
    }

    /// Logout - limpiar todo
    pub fn clear(&self) {
        self.set_user(None);
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    #[test]
    fn admin_flag_follows_loaded_user() {
        let state = AuthState::new();
        assert!(!state.is_admin());

        state.set_user(Some(User {
            id: UserId::Number(1),
            email: "root@docs.io".into(),
            name: None,
            rol: Some("admin".into()),
        }));
        assert!(state.is_admin());

        state.clear();
        assert_eq!(state.get_user(), None);
    }
}
