// ============================================================================
// SCHEDULER - Reloj, timers y tareas async (inyectables)
// ============================================================================
// En producción: chrono + gloo_timers + spawn_local.
// En tests: reloj virtual (ver `testing`).
// ============================================================================

use futures::future::LocalBoxFuture;
use gloo_timers::callback::{Interval, Timeout};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Milisegundos desde epoch
pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

pub trait TimerScheduler {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId;

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> TimerId;

    /// Cancelar un timer. Ids desconocidos o ya disparados se ignoran
    fn cancel(&self, id: TimerId);
}

pub trait TaskSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Handles vivos por id. Disparar o cancelar los saca del mapa y los suelta
struct TimerSlots<H> {
    handles: RefCell<HashMap<TimerId, H>>,
}

impl<H> Default for TimerSlots<H> {
    fn default() -> Self {
        Self { handles: RefCell::new(HashMap::new()) }
    }
}

impl<H> TimerSlots<H> {
    fn insert(&self, id: TimerId, handle: H) {
        self.handles.borrow_mut().insert(id, handle);
    }

    fn take(&self, id: TimerId) -> Option<H> {
        self.handles.borrow_mut().remove(&id)
    }

    /// El borrow se suelta antes del drop: soltar un handle puede reentrar
    fn release(&self, id: TimerId) {
        let handle = self.take(id);
        drop(handle);
    }

    fn len(&self) -> usize {
        self.handles.borrow().len()
    }
}

/// Timers del navegador. Cada handle vive en su mapa hasta que se cancela o dispara.
/// Un closure soltado mientras se ejecuta lo libera wasm-bindgen al terminar la llamada
#[derive(Default)]
pub struct GlooScheduler {
    next_id: Cell<u64>,
    timeouts: Rc<TimerSlots<Timeout>>,
    intervals: TimerSlots<Interval>,
}

impl GlooScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> TimerId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        TimerId(id)
    }

    /// Timers pendientes (para logs)
    pub fn pending(&self) -> usize {
        self.timeouts.len() + self.intervals.len()
    }
}

impl TimerScheduler for GlooScheduler {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id();
        let timeouts = Rc::clone(&self.timeouts);
        let timeout = Timeout::new(delay_ms, move || {
            // Soltar el handle antes de ejecutar: el callback puede programar otros timers
            timeouts.release(id);
            callback();
        });
        self.timeouts.insert(id, timeout);
        id
    }

    fn set_interval(&self, period_ms: u32, mut callback: Box<dyn FnMut()>) -> TimerId {
        let id = self.next_id();
        let interval = Interval::new(period_ms, move || callback());
        self.intervals.insert(id, interval);
        id
    }

    fn cancel(&self, id: TimerId) {
        // Drop = clearTimeout / clearInterval. Un tick puede cancelar su propio interval
        self.timeouts.release(id);
        self.intervals.release(id);
        log::debug!("⏱️ [TIMERS] Cancelado {:?}, quedan {}", id, self.pending());
    }
}

pub struct WasmSpawner;

impl TaskSpawner for WasmSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_handles_are_dropped_not_kept() {
        let slots: TimerSlots<Rc<()>> = TimerSlots::default();
        let handle = Rc::new(());
        slots.insert(TimerId(1), Rc::clone(&handle));
        assert_eq!(Rc::strong_count(&handle), 2);

        slots.release(TimerId(1));

        assert_eq!(Rc::strong_count(&handle), 1);
        assert_eq!(slots.len(), 0);
    }

    #[test]
    fn releasing_unknown_or_fired_ids_is_a_no_op() {
        let slots: TimerSlots<Rc<()>> = TimerSlots::default();
        slots.insert(TimerId(1), Rc::new(()));

        slots.release(TimerId(7));
        assert_eq!(slots.len(), 1);
        slots.release(TimerId(1));
        slots.release(TimerId(1));
        assert_eq!(slots.len(), 0);
    }
}
