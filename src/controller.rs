//! Host-facing control of a running worm
//!
//! Binds a [`WormSimulator`] to a [`Scheduler`]. Start/stop are idempotent and
//! resizes share the tick's lock, so a tick never sees a half-applied size.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::scheduler::Scheduler;
use crate::sim::{Segment, TurnSource, WormSimulator};

/// Whether the scheduler is currently driving ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

impl RunState {
    /// Status shown next to the pause/resume hint
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Stopped => "(stopped)",
            RunState::Running => "(moving)",
        }
    }

    pub fn is_running(&self) -> bool {
        *self == RunState::Running
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct WormController<T, S>
where
    T: TurnSource + Send + 'static,
    S: Scheduler,
{
    sim: Arc<Mutex<WormSimulator<T>>>,
    scheduler: S,
    pace: Duration,
    run_state: RunState,
}

impl<T, S> WormController<T, S>
where
    T: TurnSource + Send + 'static,
    S: Scheduler,
{
    /// Wrap a simulator; ticks at the simulator's configured pace once started
    pub fn new(sim: WormSimulator<T>, scheduler: S) -> Self {
        let pace = sim.config().pace();
        Self {
            sim: Arc::new(Mutex::new(sim)),
            scheduler,
            pace,
            run_state: RunState::Stopped,
        }
    }

    /// Begin ticking; returns whether the worm is running afterwards
    pub fn start(&mut self) -> bool {
        if self.run_state.is_running() {
            log::debug!("start() ignored, already running");
            return true;
        }

        let sim = Arc::clone(&self.sim);
        let started = self.scheduler.start(
            self.pace,
            Box::new(move || {
                lock(&sim).tick();
            }),
        );
        if !started {
            log::warn!("Scheduler refused to start, worm stays stopped");
            return false;
        }

        self.run_state = RunState::Running;
        log::info!("Worm started, ticking every {:?}", self.pace);
        true
    }

    pub fn stop(&mut self) {
        if !self.run_state.is_running() {
            log::debug!("stop() ignored, already stopped");
            return;
        }

        self.scheduler.cancel();
        self.run_state = RunState::Stopped;
        log::info!("Worm stopped");
    }

    /// Flip between running and stopped (the tap gesture)
    pub fn toggle(&mut self) -> RunState {
        if self.run_state.is_running() {
            self.stop();
        } else {
            self.start();
        }
        self.run_state
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Host reports a new drawable size (first layout, rotation)
    pub fn on_field_resize(&self, width: f32, height: f32) {
        lock(&self.sim).on_field_resize(width, height);
    }

    /// Current head-first frame
    pub fn segments(&self) -> Vec<Segment> {
        lock(&self.sim).segments()
    }

    /// Run `f` with exclusive access to the simulator
    pub fn with_simulator<R>(&self, f: impl FnOnce(&mut WormSimulator<T>) -> R) -> R {
        f(&mut lock(&self.sim))
    }

    pub fn pace(&self) -> Duration {
        self.pace
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<T, S> Drop for WormController<T, S>
where
    T: TurnSource + Send + 'static,
    S: Scheduler,
{
    fn drop(&mut self) {
        self.stop();
    }
}

/// State is valid between ticks, so a poisoned lock is still usable
fn lock<T: TurnSource>(sim: &Mutex<WormSimulator<T>>) -> MutexGuard<'_, WormSimulator<T>> {
    sim.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WormConfig;
    use crate::scheduler::ManualScheduler;
    use crate::sim::SeededTurns;

    fn controller() -> (WormController<SeededTurns, ManualScheduler>, ManualScheduler) {
        let sim = WormSimulator::new(WormConfig::default(), SeededTurns::new(3)).unwrap();
        let scheduler = ManualScheduler::new();
        let host = scheduler.clone();
        (WormController::new(sim, scheduler), host)
    }

    #[test]
    fn test_labels() {
        assert_eq!(RunState::Stopped.to_string(), "(stopped)");
        assert_eq!(RunState::Running.label(), "(moving)");
        assert_eq!(RunState::default(), RunState::Stopped);
    }

    #[test]
    fn test_start_uses_configured_pace() {
        let (mut ctrl, host) = controller();
        assert!(ctrl.start());
        assert!(ctrl.start());
        assert_eq!(host.starts(), 1);
        assert_eq!(host.interval(), Some(Duration::from_millis(70)));
        assert_eq!(ctrl.pace(), Duration::from_millis(70));
    }

    #[test]
    fn test_toggle_alternates() {
        let (mut ctrl, host) = controller();
        assert_eq!(ctrl.toggle(), RunState::Running);
        assert!(host.is_active());
        assert_eq!(ctrl.toggle(), RunState::Stopped);
        assert!(!host.is_active());
        assert_eq!(ctrl.toggle(), RunState::Running);
        assert_eq!(host.starts(), 2);
    }

    #[test]
    fn test_fired_ticks_advance_the_worm() {
        let (mut ctrl, host) = controller();
        ctrl.on_field_resize(400.0, 600.0);
        ctrl.start();
        for _ in 0..5 {
            assert!(host.fire());
        }
        assert_eq!(ctrl.with_simulator(|sim| sim.state().time_ticks), 5);
        assert_eq!(ctrl.segments().len(), 40);
    }

    /// Tick source that can never be set up
    struct RefusingScheduler;

    impl Scheduler for RefusingScheduler {
        fn start(&mut self, _interval: Duration, _callback: crate::scheduler::TickCallback) -> bool {
            false
        }

        fn cancel(&mut self) {}

        fn is_active(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_failed_start_stays_stopped() {
        let sim = WormSimulator::new(WormConfig::default(), SeededTurns::new(3)).unwrap();
        let mut ctrl = WormController::new(sim, RefusingScheduler);

        assert!(!ctrl.start());
        assert_eq!(ctrl.run_state(), RunState::Stopped);
        assert_eq!(ctrl.toggle(), RunState::Stopped);
        // Nothing to cancel, stop stays a no-op
        ctrl.stop();
        assert_eq!(ctrl.run_state(), RunState::Stopped);
    }

    #[test]
    fn test_drop_cancels_scheduler() {
        let (mut ctrl, host) = controller();
        ctrl.start();
        drop(ctrl);
        assert!(!host.is_active());
        assert!(!host.fire());
    }
}
