//! Periodic tick sources
//!
//! A [`Scheduler`] calls one callback at a fixed interval until cancelled.
//! [`ThreadScheduler`] runs it on a worker thread; [`ManualScheduler`] leaves
//! firing to the host (a UI frame callback, a test).

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

pub trait Scheduler {
    /// Begin calling `callback` every `interval`, replacing any previous callback.
    /// Returns false if no tick source could be set up.
    fn start(&mut self, interval: Duration, callback: TickCallback) -> bool;
    /// Stop calling the callback. No call starts after this returns.
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}

struct Worker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Fires the callback from a dedicated thread
#[derive(Default)]
pub struct ThreadScheduler {
    worker: Option<Worker>,
}

impl ThreadScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for ThreadScheduler {
    fn start(&mut self, interval: Duration, mut callback: TickCallback) -> bool {
        self.cancel();

        let (stop, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("worm-ticker".into())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => callback(),
                        // Explicit stop or the scheduler was dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            });

        match handle {
            Ok(handle) => {
                self.worker = Some(Worker { stop, handle });
                true
            }
            Err(e) => {
                log::error!("Failed to spawn tick thread: {}", e);
                false
            }
        }
    }

    fn cancel(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop.send(());
            // Cancelling from inside the callback can't join itself
            if worker.handle.thread().id() != thread::current().id()
                && worker.handle.join().is_err()
            {
                log::warn!("Tick thread panicked");
            }
        }
    }

    fn is_active(&self) -> bool {
        self.worker.is_some()
    }
}

impl Drop for ThreadScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Default)]
struct ManualSlot {
    interval: Option<Duration>,
    callback: Option<TickCallback>,
    starts: usize,
}

/// Host-driven scheduler: the callback runs only when [`ManualScheduler::fire`] is called
///
/// Clones share one slot, so a host can keep a handle for firing while the
/// controller owns another.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    slot: Arc<Mutex<ManualSlot>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the callback once if one is installed; returns whether it ran
    pub fn fire(&self) -> bool {
        // Take the callback out so it can run without holding the slot lock
        let taken = self.lock().callback.take();
        match taken {
            Some(mut callback) => {
                callback();
                let mut slot = self.lock();
                // Only put it back if nobody cancelled or replaced it meanwhile
                if slot.callback.is_none() && slot.interval.is_some() {
                    slot.callback = Some(callback);
                }
                true
            }
            None => false,
        }
    }

    /// Interval requested by the last `start`, if still active
    pub fn interval(&self) -> Option<Duration> {
        self.lock().interval
    }

    /// Number of times `start` has been called
    pub fn starts(&self) -> usize {
        self.lock().starts
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, interval: Duration, callback: TickCallback) -> bool {
        let mut slot = self.lock();
        slot.interval = Some(interval);
        slot.callback = Some(callback);
        slot.starts += 1;
        true
    }

    fn cancel(&mut self) {
        let mut slot = self.lock();
        slot.interval = None;
        slot.callback = None;
    }

    fn is_active(&self) -> bool {
        self.lock().interval.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counter() -> (Arc<AtomicUsize>, TickCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        let callback: TickCallback = Box::new(move || {
            inner.fetch_add(1, Ordering::SeqCst);
        });
        (count, callback)
    }

    #[test]
    fn test_manual_fires_only_while_active() {
        let mut scheduler = ManualScheduler::new();
        assert!(!scheduler.fire());

        let (count, callback) = counter();
        assert!(scheduler.start(Duration::from_millis(70), callback));
        assert!(scheduler.is_active());
        assert_eq!(scheduler.interval(), Some(Duration::from_millis(70)));
        assert!(scheduler.fire());
        assert!(scheduler.fire());
        assert_eq!(count.load(Ordering::SeqCst), 2);

        scheduler.cancel();
        assert!(!scheduler.fire());
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(scheduler.starts(), 1);
    }

    #[test]
    fn test_manual_clones_share_slot() {
        let mut owner = ManualScheduler::new();
        let host = owner.clone();
        let (count, callback) = counter();
        owner.start(Duration::from_millis(10), callback);
        assert!(host.fire());
        owner.cancel();
        assert!(!host.fire());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_thread_scheduler_ticks_and_stops() {
        let mut scheduler = ThreadScheduler::new();
        let (count, callback) = counter();
        assert!(scheduler.start(Duration::from_millis(5), callback));
        assert!(scheduler.is_active());

        thread::sleep(Duration::from_millis(100));
        scheduler.cancel();
        assert!(!scheduler.is_active());

        let after_cancel = count.load(Ordering::SeqCst);
        assert!(after_cancel > 0);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }

    #[test]
    fn test_thread_scheduler_restart_replaces_worker() {
        let mut scheduler = ThreadScheduler::new();
        let (first, callback) = counter();
        scheduler.start(Duration::from_millis(5), callback);
        let (second, callback) = counter();
        scheduler.start(Duration::from_millis(5), callback);

        let frozen = first.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        scheduler.cancel();
        assert_eq!(first.load(Ordering::SeqCst), frozen);
        assert!(second.load(Ordering::SeqCst) > 0);
    }
}
