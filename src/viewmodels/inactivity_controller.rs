// ============================================================================
// INACTIVITY CONTROLLER - Expiración de sesión por inactividad
// ============================================================================
// Active --(idle)--> Warning --(countdown 0 / timeout)--> LoggingOut
//   ^                   |
//   +----(extend)-------+
//
// Vive mientras el dashboard está montado. Todos los colaboradores del
// navegador llegan inyectados (timers, listeners, navegación, storage).
// Cada transición cancela los tres timers antes de armar los nuevos.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use crate::config::SessionConfig;
use crate::services::auth_client::SessionEnder;
use crate::services::browser_events::ActivityEventSource;
use crate::services::navigation::{NavigationEventSource, NavigationHandlers, Navigator, Notifier};
use crate::services::scheduler::{Clock, TaskSpawner, TimerId, TimerScheduler};
use crate::services::token_store::TokenStore;
use crate::state::ReactiveState;
use crate::utils::{
    format_countdown, ALLOWED_EXIT_PATHS, AUTO_LOGOUT_NOTICE, DASHBOARD_PATH, LOGIN_PATH, ROOT_PATH,
};

const COUNTDOWN_TICK_MS: u32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InactivityPhase {
    Active,
    Warning,
    LoggingOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InactivityTimerState {
    /// Epoch ms en que se mostrará el aviso (solo en Active)
    pub idle_deadline: Option<i64>,
    /// Epoch ms del logout forzado (solo en Warning)
    pub warning_deadline: Option<i64>,
    pub countdown_seconds_remaining: u32,
    pub is_warning_visible: bool,
    /// Latch: una vez true no vuelve a false
    pub is_logging_out: bool,
}

/// Lo que la vista necesita para pintar el modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InactivitySnapshot {
    pub phase: InactivityPhase,
    pub countdown_seconds: u32,
    pub countdown_display: String,
    pub warning_visible: bool,
    pub logging_out: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivityConfig {
    pub idle_ms: u32,
    pub warning_seconds: u32,
    pub logout_redirect_delay_ms: u32,
}

impl From<&SessionConfig> for InactivityConfig {
    fn from(session: &SessionConfig) -> Self {
        Self {
            idle_ms: session.inactivity_ms(),
            warning_seconds: session.warning_seconds,
            logout_redirect_delay_ms: session.logout_redirect_delay_ms,
        }
    }
}

/// Colaboradores inyectados
#[derive(Clone)]
pub struct InactivityDeps {
    pub clock: Rc<dyn Clock>,
    pub timers: Rc<dyn TimerScheduler>,
    pub spawner: Rc<dyn TaskSpawner>,
    pub activity: Rc<dyn ActivityEventSource>,
    pub navigation: Rc<dyn NavigationEventSource>,
    pub navigator: Rc<dyn Navigator>,
    pub notifier: Rc<dyn Notifier>,
    pub store: Rc<dyn TokenStore>,
    pub session: Rc<dyn SessionEnder>,
}

#[derive(Default)]
struct ArmedTimers {
    idle: Option<TimerId>,
    warning: Option<TimerId>,
    countdown: Option<TimerId>,
}

struct Inner {
    config: InactivityConfig,
    deps: InactivityDeps,
    phase: Cell<InactivityPhase>,
    started: Cell<bool>,
    state: RefCell<InactivityTimerState>,
    timers: RefCell<ArmedTimers>,
    snapshots: ReactiveState<InactivitySnapshot>,
}

#[derive(Clone)]
pub struct InactivityController {
    inner: Rc<Inner>,
}

impl InactivityController {
    pub fn new(config: InactivityConfig, deps: InactivityDeps) -> Self {
        let state = InactivityTimerState {
            idle_deadline: None,
            warning_deadline: None,
            countdown_seconds_remaining: config.warning_seconds,
            is_warning_visible: false,
            is_logging_out: false,
        };
        let snapshot = snapshot_of(InactivityPhase::Active, &state);
        Self {
            inner: Rc::new(Inner {
                config,
                deps,
                phase: Cell::new(InactivityPhase::Active),
                started: Cell::new(false),
                state: RefCell::new(state),
                timers: RefCell::new(ArmedTimers::default()),
                snapshots: ReactiveState::new(snapshot),
            }),
        }
    }

    /// Montaje del dashboard: guards de navegación + listeners + timer de inactividad
    pub fn start(&self) {
        let inner = &self.inner;
        if inner.started.get() || inner.is_logging_out() {
            log::warn!("⚠️ [INACTIVITY] start ignorado (ya iniciado o cerrando sesión)");
            return;
        }
        inner.started.set(true);
        inner.deps.navigation.bind(inner.navigation_handlers());
        inner.enter_active();
        log::info!(
            "⏱️ [INACTIVITY] Controlador iniciado ({} s de inactividad)",
            inner.config.idle_ms / 1_000
        );
    }

    /// Desmontaje sin logout
    pub fn stop(&self) {
        let inner = &self.inner;
        inner.cancel_all();
        inner.deps.activity.detach();
        inner.deps.navigation.unbind();
        inner.started.set(false);
        log::info!("🛑 [INACTIVITY] Controlador detenido");
    }

    /// Interacción del usuario. Solo cuenta en Active
    pub fn record_activity(&self) {
        self.inner.record_activity();
    }

    /// "Seguir conectado" en el modal de aviso
    pub fn extend_session(&self) {
        let inner = &self.inner;
        if !inner.started.get() || inner.phase.get() != InactivityPhase::Warning || inner.is_logging_out() {
            return;
        }
        log::info!("🔄 [INACTIVITY] Sesión extendida por el usuario");
        inner.enter_active();
    }

    /// Logout manual (botón "Cerrar sesión" ya confirmado)
    pub fn logout(&self) {
        self.inner.perform_logout(false);
    }

    pub fn phase(&self) -> InactivityPhase {
        self.inner.phase.get()
    }

    pub fn timer_state(&self) -> InactivityTimerState {
        self.inner.state.borrow().clone()
    }

    pub fn snapshot(&self) -> InactivitySnapshot {
        self.inner.snapshots.get()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&InactivitySnapshot) + 'static,
    {
        self.inner.snapshots.subscribe(callback);
    }
}

fn snapshot_of(phase: InactivityPhase, state: &InactivityTimerState) -> InactivitySnapshot {
    InactivitySnapshot {
        phase,
        countdown_seconds: state.countdown_seconds_remaining,
        countdown_display: format_countdown(state.countdown_seconds_remaining),
        warning_visible: state.is_warning_visible,
        logging_out: state.is_logging_out,
    }
}

/// `/login`, `/` o cualquier ruta fuera del dashboard
fn leaves_dashboard(path: &str) -> bool {
    path == LOGIN_PATH || path == ROOT_PATH || !path.starts_with(DASHBOARD_PATH)
}

fn is_allowed_exit(href: &str) -> bool {
    ALLOWED_EXIT_PATHS.iter().any(|allowed| href.contains(allowed))
}

impl Inner {
    fn is_logging_out(&self) -> bool {
        self.state.borrow().is_logging_out
    }

    fn publish(&self) {
        let snapshot = snapshot_of(self.phase.get(), &self.state.borrow());
        self.snapshots.set(snapshot);
    }

    fn cancel_all(&self) {
        let armed = std::mem::take(&mut *self.timers.borrow_mut());
        for id in [armed.idle, armed.warning, armed.countdown].into_iter().flatten() {
            self.deps.timers.cancel(id);
        }
    }

    // ------------------------------------------------------------------------
    // Transiciones
    // ------------------------------------------------------------------------

    fn enter_active(self: &Rc<Self>) {
        self.cancel_all();
        self.phase.set(InactivityPhase::Active);
        {
            let mut state = self.state.borrow_mut();
            state.warning_deadline = None;
            state.is_warning_visible = false;
            state.countdown_seconds_remaining = self.config.warning_seconds;
        }
        if !self.deps.activity.is_attached() {
            let weak = Rc::downgrade(self);
            self.deps.activity.attach(Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.record_activity();
                }
            }));
        }
        self.arm_idle();
        self.publish();
    }

    fn arm_idle(self: &Rc<Self>) {
        let deadline = self.deps.clock.now_ms() + i64::from(self.config.idle_ms);
        self.state.borrow_mut().idle_deadline = Some(deadline);

        let weak = Rc::downgrade(self);
        let id = self.deps.timers.set_timeout(
            self.config.idle_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.on_idle_elapsed();
                }
            }),
        );
        self.timers.borrow_mut().idle = Some(id);
    }

    fn record_activity(self: &Rc<Self>) {
        if !self.started.get() || self.phase.get() != InactivityPhase::Active || self.is_logging_out() {
            return;
        }
        self.cancel_all();
        self.arm_idle();
    }

    fn on_idle_elapsed(self: &Rc<Self>) {
        self.timers.borrow_mut().idle = None;
        if self.phase.get() != InactivityPhase::Active || self.is_logging_out() {
            return;
        }
        self.enter_warning();
    }

    fn enter_warning(self: &Rc<Self>) {
        self.cancel_all();
        self.deps.activity.detach();
        self.phase.set(InactivityPhase::Warning);

        let warning_ms = self.config.warning_seconds.saturating_mul(1_000);
        {
            let mut state = self.state.borrow_mut();
            state.idle_deadline = None;
            state.warning_deadline = Some(self.deps.clock.now_ms() + i64::from(warning_ms));
            state.countdown_seconds_remaining = self.config.warning_seconds;
            state.is_warning_visible = true;
        }
        log::warn!(
            "⚠️ [INACTIVITY] Inactividad detectada, logout en {} s",
            self.config.warning_seconds
        );

        let weak_tick = Rc::downgrade(self);
        let countdown = self.deps.timers.set_interval(
            COUNTDOWN_TICK_MS,
            Box::new(move || {
                if let Some(inner) = weak_tick.upgrade() {
                    inner.on_countdown_tick();
                }
            }),
        );
        let weak_warning: Weak<Inner> = Rc::downgrade(self);
        let warning = self.deps.timers.set_timeout(
            warning_ms,
            Box::new(move || {
                if let Some(inner) = weak_warning.upgrade() {
                    inner.on_warning_elapsed();
                }
            }),
        );
        {
            let mut timers = self.timers.borrow_mut();
            timers.countdown = Some(countdown);
            timers.warning = Some(warning);
        }
        self.publish();
    }

    fn on_countdown_tick(self: &Rc<Self>) {
        if self.phase.get() != InactivityPhase::Warning || self.is_logging_out() {
            return;
        }
        let remaining = {
            let mut state = self.state.borrow_mut();
            state.countdown_seconds_remaining = state.countdown_seconds_remaining.saturating_sub(1);
            state.countdown_seconds_remaining
        };
        self.publish();
        if remaining == 0 {
            log::warn!("⌛ [INACTIVITY] Contador agotado");
            self.perform_logout(true);
        }
    }

    fn on_warning_elapsed(self: &Rc<Self>) {
        self.timers.borrow_mut().warning = None;
        if self.phase.get() == InactivityPhase::Warning {
            self.perform_logout(true);
        }
    }

    fn perform_logout(self: &Rc<Self>, automatic: bool) {
        if self.is_logging_out() {
            return;
        }
        {
            let mut state = self.state.borrow_mut();
            state.is_logging_out = true;
            state.is_warning_visible = false;
            state.idle_deadline = None;
            state.warning_deadline = None;
        }
        self.phase.set(InactivityPhase::LoggingOut);
        self.cancel_all();
        self.deps.activity.detach();
        self.deps.navigation.unbind();
        self.publish();
        log::info!(
            "👋 [INACTIVITY] Cerrando sesión ({})",
            if automatic { "automático" } else { "manual" }
        );

        let session = Rc::clone(&self.deps.session);
        let store = Rc::clone(&self.deps.store);
        let notifier = Rc::clone(&self.deps.notifier);
        let navigator = Rc::clone(&self.deps.navigator);
        let timers = Rc::clone(&self.deps.timers);
        let redirect_delay = self.config.logout_redirect_delay_ms;
        self.deps.spawner.spawn(Box::pin(async move {
            session.end_session().await;
            store.clear_all();
            if automatic {
                notifier.show_notice(AUTO_LOGOUT_NOTICE);
            }
            timers.set_timeout(
                redirect_delay,
                Box::new(move || navigator.redirect_to(LOGIN_PATH)),
            );
        }));
    }

    // ------------------------------------------------------------------------
    // Guards de navegación
    // ------------------------------------------------------------------------

    fn navigation_handlers(self: &Rc<Self>) -> NavigationHandlers {
        let weak_show = Rc::downgrade(self);
        let weak_pop = Rc::downgrade(self);
        let weak_unload = Rc::downgrade(self);
        NavigationHandlers {
            on_page_show: Rc::new(move |persisted| {
                if let Some(inner) = weak_show.upgrade() {
                    if persisted {
                        log::info!("🔁 [INACTIVITY] Página restaurada desde bfcache, recargando");
                        inner.deps.navigator.reload();
                    }
                }
            }),
            on_pop_state: Rc::new(move |path| {
                if let Some(inner) = weak_pop.upgrade() {
                    if leaves_dashboard(&path) {
                        log::info!("⬅️ [INACTIVITY] Navegación atrás a {}, cerrando sesión local", path);
                        inner.cancel_all();
                        inner.deps.activity.detach();
                        inner.deps.navigation.unbind();
                        inner.started.set(false);
                        inner.deps.store.clear_all();
                        inner.deps.navigator.redirect_to(LOGIN_PATH);
                    }
                }
            }),
            on_before_unload: Rc::new(move |focused_href| {
                let Some(inner) = weak_unload.upgrade() else {
                    return false;
                };
                if inner.is_logging_out() {
                    return false;
                }
                !focused_href.as_deref().is_some_and(is_allowed_exit)
            }),
        }
    }
}
