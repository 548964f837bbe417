// ============================================================================
// TESTING - Dobles de prueba para los colaboradores del navegador
// ============================================================================

use async_trait::async_trait;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use crate::error::AuthError;
use crate::services::browser_events::ActivityEventSource;
use crate::services::http::{ApiRequest, ApiResponse, HttpTransport};
use crate::services::navigation::{NavigationEventSource, NavigationHandlers, Navigator, Notifier};
use crate::services::scheduler::{Clock, TaskSpawner, TimerId, TimerScheduler};
use crate::services::token_store::TokenStore;

// ----------------------------------------------------------------------------
// Reloj + timers con tiempo virtual
// ----------------------------------------------------------------------------

enum TimerKind {
    Once(Option<Box<dyn FnOnce()>>),
    Every {
        period: u32,
        callback: Rc<RefCell<Box<dyn FnMut()>>>,
    },
}

struct Entry {
    id: TimerId,
    due: i64,
    kind: TimerKind,
}

enum Fire {
    Once(Box<dyn FnOnce()>),
    Every(Rc<RefCell<Box<dyn FnMut()>>>),
}

/// Reloj y scheduler compartiendo el mismo "ahora". Nada corre hasta `advance`
#[derive(Default)]
pub struct FakeScheduler {
    now: Cell<i64>,
    next_id: Cell<u64>,
    entries: RefCell<Vec<Entry>>,
}

impl FakeScheduler {
    pub fn starting_at(now_ms: i64) -> Self {
        let scheduler = Self::default();
        scheduler.now.set(now_ms);
        scheduler
    }

    /// Avanzar el tiempo disparando en orden todo lo que venza
    pub fn advance(&self, ms: i64) {
        let target = self.now.get() + ms;
        loop {
            let next = self
                .entries
                .borrow()
                .iter()
                .filter(|e| e.due <= target)
                .min_by_key(|e| (e.due, e.id.0))
                .map(|e| e.id);
            let Some(id) = next else {
                break;
            };

            let fire = {
                let mut entries = self.entries.borrow_mut();
                let Some(pos) = entries.iter().position(|e| e.id == id) else {
                    continue;
                };
                self.now.set(entries[pos].due);
                let is_interval = matches!(entries[pos].kind, TimerKind::Every { .. });
                if is_interval {
                    let entry = &mut entries[pos];
                    match &entry.kind {
                        TimerKind::Every { period, callback } => {
                            entry.due += i64::from(*period);
                            Some(Fire::Every(Rc::clone(callback)))
                        }
                        TimerKind::Once(_) => None,
                    }
                } else {
                    match entries.remove(pos).kind {
                        TimerKind::Once(callback) => callback.map(Fire::Once),
                        TimerKind::Every { .. } => None,
                    }
                }
            };

            // Sin borrows activos: el callback puede programar o cancelar timers
            match fire {
                Some(Fire::Once(callback)) => callback(),
                Some(Fire::Every(callback)) => (callback.borrow_mut())(),
                None => {}
            }
        }
        self.now.set(target);
    }

    pub fn pending_timeouts(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| matches!(e.kind, TimerKind::Once(_)))
            .count()
    }

    pub fn pending_intervals(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| matches!(e.kind, TimerKind::Every { .. }))
            .count()
    }

    fn next_id(&self) -> TimerId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        TimerId(id)
    }
}

impl Clock for FakeScheduler {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

impl TimerScheduler for FakeScheduler {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id();
        self.entries.borrow_mut().push(Entry {
            id,
            due: self.now.get() + i64::from(delay_ms),
            kind: TimerKind::Once(Some(callback)),
        });
        id
    }

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> TimerId {
        let id = self.next_id();
        self.entries.borrow_mut().push(Entry {
            id,
            due: self.now.get() + i64::from(period_ms),
            kind: TimerKind::Every {
                period: period_ms,
                callback: Rc::new(RefCell::new(callback)),
            },
        });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.entries.borrow_mut().retain(|e| e.id != id);
    }
}

// ----------------------------------------------------------------------------
// Tareas async
// ----------------------------------------------------------------------------

pub struct TestSpawner {
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

impl Default for TestSpawner {
    fn default() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            pool: RefCell::new(pool),
            spawner,
        }
    }
}

impl TestSpawner {
    /// Ejecutar las tareas pendientes hasta que ninguna pueda avanzar
    pub fn run(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }
}

impl TaskSpawner for TestSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner
            .spawn_local(task)
            .expect("test pool should accept tasks");
    }
}

// ----------------------------------------------------------------------------
// Token store en memoria
// ----------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
    clear_all_count: Cell<u32>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        *store.token.borrow_mut() = Some(token.to_string());
        store
    }

    pub fn clear_all_count(&self) -> u32 {
        self.clear_all_count.get()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set(&self, token: &str) -> Result<(), AuthError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }

    fn clear_all(&self) {
        *self.token.borrow_mut() = None;
        self.clear_all_count.set(self.clear_all_count.get() + 1);
    }
}

// ----------------------------------------------------------------------------
// Transporte HTTP con respuestas guionizadas
// ----------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeTransport {
    replies: RefCell<VecDeque<Result<ApiResponse, AuthError>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn reply(&self, status: u16, content_type: &str, body: &str) {
        self.replies.borrow_mut().push_back(Ok(ApiResponse {
            status,
            content_type: Some(content_type.to_string()),
            body: body.to_string(),
        }));
    }

    pub fn reply_json(&self, status: u16, body: &str) {
        self.reply(status, "application/json", body);
    }

    pub fn reply_html(&self, status: u16, body: &str) {
        self.reply(status, "text/html; charset=utf-8", body);
    }

    pub fn reply_text(&self, status: u16, body: &str) {
        self.reply(status, "text/plain", body);
    }

    pub fn reply_error(&self, message: &str) {
        self.replies
            .borrow_mut()
            .push_back(Err(AuthError::Transport(message.to_string())));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.path.clone()).collect()
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(AuthError::Transport("sin respuesta guionizada".to_string())))
    }
}

// ----------------------------------------------------------------------------
// Navegación y diálogos
// ----------------------------------------------------------------------------

pub struct RecordingNavigator {
    path: RefCell<String>,
    redirects: RefCell<Vec<String>>,
    reloads: Cell<u32>,
    notices: RefCell<Vec<String>>,
    confirm_answer: Cell<bool>,
    confirms: RefCell<Vec<String>>,
}

impl Default for RecordingNavigator {
    fn default() -> Self {
        Self {
            path: RefCell::new("/dashboard".to_string()),
            redirects: RefCell::new(Vec::new()),
            reloads: Cell::new(0),
            notices: RefCell::new(Vec::new()),
            confirm_answer: Cell::new(true),
            confirms: RefCell::new(Vec::new()),
        }
    }
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.borrow().clone()
    }

    pub fn reloads(&self) -> u32 {
        self.reloads.get()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn redirect_to(&self, path: &str) {
        *self.path.borrow_mut() = path.to_string();
        self.redirects.borrow_mut().push(path.to_string());
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }
}

impl Notifier for RecordingNavigator {
    fn show_notice(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }
}

// ----------------------------------------------------------------------------
// Fuentes de eventos
// ----------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeActivitySource {
    handler: RefCell<Option<Rc<dyn Fn()>>>,
    attach_count: Cell<u32>,
}

impl FakeActivitySource {
    /// Simular una interacción del usuario (no-op si no hay listeners)
    pub fn fire(&self) {
        let handler = self.handler.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    pub fn attach_count(&self) -> u32 {
        self.attach_count.get()
    }
}

impl ActivityEventSource for FakeActivitySource {
    fn attach(&self, on_activity: Rc<dyn Fn()>) {
        if self.handler.borrow().is_some() {
            return;
        }
        self.attach_count.set(self.attach_count.get() + 1);
        *self.handler.borrow_mut() = Some(on_activity);
    }

    fn detach(&self) {
        *self.handler.borrow_mut() = None;
    }

    fn is_attached(&self) -> bool {
        self.handler.borrow().is_some()
    }
}

#[derive(Default)]
pub struct FakeNavigationEvents {
    handlers: RefCell<Option<NavigationHandlers>>,
}

impl FakeNavigationEvents {
    pub fn page_show(&self, persisted: bool) {
        let handlers = self.handlers.borrow().clone();
        if let Some(h) = handlers {
            (h.on_page_show)(persisted);
        }
    }

    pub fn pop_state(&self, path: &str) {
        let handlers = self.handlers.borrow().clone();
        if let Some(h) = handlers {
            (h.on_pop_state)(path.to_string());
        }
    }

    /// `None` si no hay guards registrados
    pub fn before_unload(&self, focused_href: Option<&str>) -> Option<bool> {
        let handlers = self.handlers.borrow().clone();
        handlers.map(|h| (h.on_before_unload)(focused_href.map(str::to_string)))
    }
}

impl NavigationEventSource for FakeNavigationEvents {
    fn bind(&self, handlers: NavigationHandlers) {
        *self.handlers.borrow_mut() = Some(handlers);
    }

    fn unbind(&self) {
        *self.handlers.borrow_mut() = None;
    }

    fn is_bound(&self) -> bool {
        self.handlers.borrow().is_some()
    }
}
