// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================
// Servicios del navegador construidos una sola vez al arrancar + estado de la
// página actual (usuario cargado y controlador de inactividad montado).
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::config::{AppConfig, CONFIG};
use crate::dom::DocumentListener;
use crate::services::{
    AccountService, AuthClient, BrowserNavigationEvents, BrowserNavigator, BrowserTokenStore,
    DomActivitySource, GlooScheduler, GlooTransport, HttpTransport, SystemClock, WasmSpawner,
};
use crate::state::AuthState;
use crate::viewmodels::{InactivityConfig, InactivityController, InactivityDeps};

/// Colaboradores reales del navegador
#[derive(Clone)]
pub struct AppServices {
    pub navigator: Rc<BrowserNavigator>,
    pub timers: Rc<GlooScheduler>,
    pub store: Rc<BrowserTokenStore>,
    pub auth: Rc<AuthClient>,
    pub account: Rc<AccountService>,
    pub inactivity: InactivityConfig,
    pub error_dismiss_ms: u32,
}

impl AppServices {
    pub fn from_config(config: &AppConfig) -> Self {
        let navigator = Rc::new(BrowserNavigator);
        let timers = Rc::new(GlooScheduler::new());
        let store = Rc::new(BrowserTokenStore::new(&config.token_storage_key));
        let transport: Rc<dyn HttpTransport> = Rc::new(GlooTransport::new(&config.api_base_url));
        let auth = Rc::new(AuthClient::new(
            Rc::clone(&transport),
            store.clone(),
            navigator.clone(),
            timers.clone(),
            config.session.unauthorized_redirect_delay_ms,
        ));
        let account = Rc::new(AccountService::new(transport));
        log::info!("🌐 [APP] API en {} ({})", config.api_base_url, config.environment);

        Self {
            navigator,
            timers,
            store,
            auth,
            account,
            inactivity: InactivityConfig::from(&config.session),
            error_dismiss_ms: config.ui.error_dismiss_ms,
        }
    }

    /// Controlador nuevo con listeners del documento y guards de `window`
    pub fn inactivity_controller(&self) -> InactivityController {
        InactivityController::new(
            self.inactivity,
            InactivityDeps {
                clock: Rc::new(SystemClock),
                timers: self.timers.clone(),
                spawner: Rc::new(WasmSpawner),
                activity: Rc::new(DomActivitySource::new()),
                navigation: Rc::new(BrowserNavigationEvents::new()),
                navigator: self.navigator.clone(),
                notifier: self.navigator.clone(),
                store: self.store.clone(),
                session: self.auth.clone(),
            },
        )
    }
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub services: AppServices,
    pub auth: AuthState,
    inactivity: Rc<RefCell<Option<InactivityController>>>,
    /// Listeners de `document` que viven mientras el dashboard está montado
    page_listeners: Rc<RefCell<Vec<DocumentListener>>>,
}

impl AppState {
    /// Crear nuevo estado de aplicación
    pub fn new() -> Self {
        Self::with_services(AppServices::from_config(&CONFIG))
    }

    pub fn with_services(services: AppServices) -> Self {
        Self {
            services,
            auth: AuthState::new(),
            inactivity: Rc::new(RefCell::new(None)),
            page_listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Montar el controlador de inactividad (reemplaza al anterior)
    pub fn mount_inactivity(&self) -> InactivityController {
        self.unmount_inactivity();
        let controller = self.services.inactivity_controller();
        controller.start();
        *self.inactivity.borrow_mut() = Some(controller.clone());
        controller
    }

    /// Desmontaje sin logout
    pub fn unmount_inactivity(&self) {
        let listeners = std::mem::take(&mut *self.page_listeners.borrow_mut());
        drop(listeners);
        let previous = self.inactivity.borrow_mut().take();
        if let Some(controller) = previous {
            controller.stop();
        }
    }

    pub fn keep_page_listener(&self, listener: DocumentListener) {
        self.page_listeners.borrow_mut().push(listener);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
