// ============================================================================
// DASHBOARD VIEWMODEL - Carga del perfil y logout confirmado
// ============================================================================

use std::rc::Rc;
use crate::models::User;
use crate::services::{AuthClient, Navigator, Notifier, VerifyOutcome};
use crate::utils::{LOGIN_PATH, LOGOUT_CONFIRM};
use crate::viewmodels::InactivityController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardLoad {
    Ready(User),
    /// Redirección al login ya en marcha
    Unauthenticated,
}

pub struct DashboardViewModel {
    client: Rc<AuthClient>,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
}

impl DashboardViewModel {
    pub fn new(client: Rc<AuthClient>, navigator: Rc<dyn Navigator>, notifier: Rc<dyn Notifier>) -> Self {
        Self { client, navigator, notifier }
    }

    pub async fn load(&self) -> DashboardLoad {
        let store = self.client.token_store();
        if !store.has_well_formed_token() {
            log::warn!("⚠️ [DASHBOARD] Token ausente o mal formado");
            store.clear_all();
            self.navigator.redirect_to(LOGIN_PATH);
            return DashboardLoad::Unauthenticated;
        }

        match self.client.verify_detailed(None).await {
            VerifyOutcome::Valid => {}
            // El AuthClient ya limpió el token y programó la redirección
            VerifyOutcome::Unauthorized => return DashboardLoad::Unauthenticated,
            other => {
                log::warn!("⚠️ [DASHBOARD] Sesión no verificada: {:?}", other);
                store.clear();
                self.navigator.redirect_to(LOGIN_PATH);
                return DashboardLoad::Unauthenticated;
            }
        }

        match self.client.fetch_profile().await {
            Ok(user) => {
                log::info!("✅ [DASHBOARD] Perfil cargado: {}", user.email);
                DashboardLoad::Ready(user)
            }
            Err(e) if e.is_authorization_failure() => DashboardLoad::Unauthenticated,
            Err(e) => {
                log::error!("❌ [DASHBOARD] Error loading user data: {}", e);
                store.clear();
                self.navigator.redirect_to(LOGIN_PATH);
                DashboardLoad::Unauthenticated
            }
        }
    }

    /// Botón "Cerrar sesión". `true` si el usuario confirmó
    pub fn request_logout(&self, controller: &InactivityController) -> bool {
        if !self.notifier.confirm(LOGOUT_CONFIRM) {
            return false;
        }
        controller.logout();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::services::TokenStore;
    use crate::testing::{
        FakeActivitySource, FakeNavigationEvents, FakeScheduler, FakeTransport, MemoryTokenStore,
        RecordingNavigator, TestSpawner,
    };
    use crate::viewmodels::{InactivityConfig, InactivityDeps, InactivityPhase};
    use futures::executor::block_on;

    struct Fixture {
        transport: Rc<FakeTransport>,
        store: Rc<MemoryTokenStore>,
        navigator: Rc<RecordingNavigator>,
        timers: Rc<FakeScheduler>,
        client: Rc<AuthClient>,
        vm: DashboardViewModel,
    }

    fn fixture(store: MemoryTokenStore) -> Fixture {
        let transport = Rc::new(FakeTransport::default());
        let store = Rc::new(store);
        let navigator = Rc::new(RecordingNavigator::default());
        let timers = Rc::new(FakeScheduler::default());
        let client = Rc::new(AuthClient::new(
            transport.clone(),
            store.clone(),
            navigator.clone(),
            timers.clone(),
            2_000,
        ));
        let vm = DashboardViewModel::new(client.clone(), navigator.clone(), navigator.clone());
        Fixture { transport, store, navigator, timers, client, vm }
    }

    #[test]
    fn loads_profile_with_valid_session() {
        let f = fixture(MemoryTokenStore::with_token("h.p.s"));
        f.transport.reply_json(200, r#"{"authenticated":true}"#);
        f.transport
            .reply_json(200, r#"{"user":{"id":3,"email":"ana@docs.io","name":"Ana"}}"#);

        match block_on(f.vm.load()) {
            DashboardLoad::Ready(user) => assert_eq!(user.display_name(), "Ana"),
            other => panic!("expected profile, got {:?}", other),
        }
        let requests = f.transport.requests();
        assert!(requests.iter().all(|r| r.bearer.as_deref() == Some("h.p.s")));
    }

    #[test]
    fn malformed_token_redirects_without_requests() {
        let f = fixture(MemoryTokenStore::with_token("no-es-jwt"));

        assert_eq!(block_on(f.vm.load()), DashboardLoad::Unauthenticated);
        assert_eq!(f.store.clear_all_count(), 1);
        assert_eq!(f.navigator.redirects(), vec![LOGIN_PATH.to_string()]);
        assert!(f.transport.requests().is_empty());
    }

    #[test]
    fn unauthorized_verify_clears_and_redirects_after_delay() {
        let f = fixture(MemoryTokenStore::with_token("h.p.s"));
        f.transport.reply_json(401, r#"{"detail":"Token expirado"}"#);

        assert_eq!(block_on(f.vm.load()), DashboardLoad::Unauthenticated);
        assert_eq!(f.store.get(), None);
        assert!(f.navigator.redirects().is_empty());

        f.timers.advance(2_000);
        assert_eq!(f.navigator.redirects(), vec![LOGIN_PATH.to_string()]);
        assert_eq!(f.transport.requests().len(), 1);
    }

    #[test]
    fn unreachable_server_sends_user_to_login() {
        let f = fixture(MemoryTokenStore::with_token("h.p.s"));
        f.transport.reply_error("offline");

        assert_eq!(block_on(f.vm.load()), DashboardLoad::Unauthenticated);
        assert_eq!(f.navigator.redirects(), vec![LOGIN_PATH.to_string()]);
    }

    #[test]
    fn logout_requires_confirmation() {
        let f = fixture(MemoryTokenStore::with_token("h.p.s"));
        let spawner = Rc::new(TestSpawner::default());
        let controller = InactivityController::new(
            InactivityConfig::from(&SessionConfig::default()),
            InactivityDeps {
                clock: f.timers.clone(),
                timers: f.timers.clone(),
                spawner: spawner.clone(),
                activity: Rc::new(FakeActivitySource::default()),
                navigation: Rc::new(FakeNavigationEvents::default()),
                navigator: f.navigator.clone(),
                notifier: f.navigator.clone(),
                store: f.store.clone(),
                session: f.client.clone(),
            },
        );
        controller.start();

        f.navigator.answer_confirm(false);
        assert!(!f.vm.request_logout(&controller));
        assert_eq!(controller.phase(), InactivityPhase::Active);

        f.navigator.answer_confirm(true);
        f.transport.reply_json(200, "{}");
        assert!(f.vm.request_logout(&controller));
        assert_eq!(controller.phase(), InactivityPhase::LoggingOut);
        assert_eq!(f.navigator.confirms(), vec![LOGOUT_CONFIRM.to_string(); 2]);

        spawner.run();
        f.timers.advance(1_000);
        assert_eq!(f.store.get(), None);
        assert_eq!(f.navigator.redirects(), vec![LOGIN_PATH.to_string()]);
    }
}
