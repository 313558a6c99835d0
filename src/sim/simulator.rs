//! Owner of the worm state and its field
//!
//! The simulator holds no timer. A scheduler (or a test) calls [`WormSimulator::tick`]
//! and reads the frame back, or registers a [`FrameObserver`] to have each
//! frame pushed to it.

use std::collections::VecDeque;

use glam::Vec2;

use super::field::FieldBounds;
use super::random::TurnSource;
use super::state::{Segment, WormState};
use super::tick::{TickOutcome, tick};
use crate::settings::{ConfigError, WormConfig};

/// Receives the head-first segment list after every tick
pub trait FrameObserver: Send {
    fn on_frame(&mut self, segments: &[Segment]);
}

impl<F: FnMut(&[Segment]) + Send> FrameObserver for F {
    fn on_frame(&mut self, segments: &[Segment]) {
        self(segments)
    }
}

pub struct WormSimulator<T: TurnSource> {
    state: WormState,
    field: FieldBounds,
    config: WormConfig,
    turns: T,
    observers: Vec<Box<dyn FrameObserver>>,
}

impl<T: TurnSource> WormSimulator<T> {
    /// Build the initial diagonal worm; the field stays 0x0 until the first resize
    pub fn new(config: WormConfig, turns: T) -> Result<Self, ConfigError> {
        let state = WormState::new(&config);
        let field = FieldBounds::new(0.0, 0.0, config.radius);
        Self::from_state(state, field, config, turns)
    }

    /// Resume from an explicit state and field
    pub fn from_state(
        state: WormState,
        field: FieldBounds,
        config: WormConfig,
        turns: T,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state,
            field,
            config,
            turns,
            observers: Vec::new(),
        })
    }

    /// Host reports a new drawable size; applied on the next tick
    pub fn on_field_resize(&mut self, width: f32, height: f32) {
        log::debug!(
            "Field resized {}x{} -> {}x{}",
            self.field.width,
            self.field.height,
            width,
            height
        );
        self.field.resize(width, height);
    }

    /// Advance one step and notify observers
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = tick(&mut self.state, &self.field, &self.config, &mut self.turns);
        if !self.observers.is_empty() {
            let segments = self.state.segments();
            for observer in &mut self.observers {
                observer.on_frame(&segments);
            }
        }
        outcome
    }

    pub fn subscribe(&mut self, observer: impl FrameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Head-first segment centres
    pub fn positions(&self) -> &VecDeque<Vec2> {
        &self.state.positions
    }

    /// Head-first (centre, weight) pairs
    pub fn segments(&self) -> Vec<Segment> {
        self.state.segments()
    }

    pub fn head(&self) -> Vec2 {
        self.state.head()
    }

    pub fn state(&self) -> &WormState {
        &self.state
    }

    pub fn field(&self) -> &FieldBounds {
        &self.field
    }

    pub fn config(&self) -> &WormConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::sim::random::{ScriptedTurns, SeededTurns};

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = WormConfig {
            segment_count: 0,
            ..Default::default()
        };
        assert!(WormSimulator::new(config, SeededTurns::new(1)).is_err());
    }

    #[test]
    fn test_from_state_rejects_inverted_leg_range() {
        let config = WormConfig {
            min_steps_before_turn: 6,
            max_steps_before_turn: 5,
            ..Default::default()
        };
        let state = WormState::new(&config);
        let field = FieldBounds::new(400.0, 400.0, config.radius);
        let result = WormSimulator::from_state(state, field, config, SeededTurns::new(1));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidLegRange { min: 6, max: 5 })
        ));
    }

    #[test]
    fn test_from_state_keeps_given_pose() {
        let config = WormConfig::default();
        let state = WormState::with_chain([Vec2::new(50.0, 60.0); 3], 90, Vec2::ZERO, 2);
        let field = FieldBounds::new(400.0, 400.0, config.radius);
        let sim = WormSimulator::from_state(state.clone(), field, config, ScriptedTurns::default()).unwrap();
        assert_eq!(sim.state(), &state);
        assert_eq!(sim.field(), &field);
    }

    #[test]
    fn test_resize_has_no_motion_side_effect() {
        let mut sim = WormSimulator::new(WormConfig::default(), SeededTurns::new(1)).unwrap();
        let before = sim.state().clone();
        sim.on_field_resize(320.0, 480.0);
        assert_eq!(sim.state(), &before);
        assert_eq!(sim.field().width, 320.0);
        assert_eq!(sim.field().height, 480.0);
    }

    #[test]
    fn test_tick_preserves_length() {
        let mut sim = WormSimulator::new(WormConfig::default(), SeededTurns::new(5)).unwrap();
        sim.on_field_resize(390.0, 780.0);
        for _ in 0..300 {
            sim.tick();
            assert_eq!(sim.positions().len(), 40);
        }
        assert_eq!(sim.state().time_ticks, 300);
    }

    #[test]
    fn test_observer_sees_each_frame() {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&frames);

        let mut sim = WormSimulator::new(WormConfig::default(), ScriptedTurns::default()).unwrap();
        sim.on_field_resize(400.0, 400.0);
        sim.subscribe(move |segments: &[Segment]| {
            sink.lock().unwrap().push(segments[0].center);
        });

        sim.tick();
        sim.tick();

        let frames = frames.lock().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1], sim.head());
    }

    #[test]
    fn test_rotation_recovers_into_new_field() {
        let mut sim = WormSimulator::new(WormConfig::default(), SeededTurns::new(11)).unwrap();
        sim.on_field_resize(800.0, 400.0);
        for _ in 0..200 {
            sim.tick();
        }

        // Portrait after landscape: the head may now be off to the right
        sim.on_field_resize(400.0, 800.0);
        let mut ticks = 0;
        while !sim.field().contains(sim.head()) {
            assert_eq!(sim.tick(), TickOutcome::Recovered);
            ticks += 1;
            assert!(ticks < 100, "head never made it back into the field");
        }
        assert!(sim.field().contains(sim.head()));
    }
}
