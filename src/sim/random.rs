//! Random draws that drive the walk
//!
//! The simulator never touches an RNG directly; it asks a [`TurnSource`] for
//! each turn and leg length, so tests can script the exact sequence.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Provider of the two random quantities a new leg needs
pub trait TurnSource {
    /// Turn to apply to the azimuth, uniform in `-max_yaw..=max_yaw` degrees
    fn turn_delta(&mut self, max_yaw: i32) -> i32;
    /// Leg duration in ticks, uniform in `min..=max`
    fn leg_length(&mut self, min: u32, max: u32) -> u32;
}

impl<T: TurnSource + ?Sized> TurnSource for Box<T> {
    fn turn_delta(&mut self, max_yaw: i32) -> i32 {
        (**self).turn_delta(max_yaw)
    }

    fn leg_length(&mut self, min: u32, max: u32) -> u32 {
        (**self).leg_length(min, max)
    }
}

/// PCG32-backed draws, reproducible from a seed
#[derive(Debug, Clone)]
pub struct SeededTurns {
    seed: u64,
    rng: Pcg32,
}

impl SeededTurns {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl TurnSource for SeededTurns {
    fn turn_delta(&mut self, max_yaw: i32) -> i32 {
        self.rng.random_range(-max_yaw..=max_yaw)
    }

    fn leg_length(&mut self, min: u32, max: u32) -> u32 {
        self.rng.random_range(min..=max)
    }
}

/// Pre-recorded draws, replayed in order
///
/// Once a queue runs dry the source falls back to a zero turn and the
/// shortest leg, so a short script never panics mid-run.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTurns {
    turns: VecDeque<i32>,
    legs: VecDeque<u32>,
}

impl ScriptedTurns {
    pub fn new(turns: impl IntoIterator<Item = i32>, legs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            turns: turns.into_iter().collect(),
            legs: legs.into_iter().collect(),
        }
    }

    /// Draws not consumed yet, as (turns, legs)
    pub fn remaining(&self) -> (usize, usize) {
        (self.turns.len(), self.legs.len())
    }
}

impl TurnSource for ScriptedTurns {
    fn turn_delta(&mut self, max_yaw: i32) -> i32 {
        self.turns
            .pop_front()
            .map_or(0, |t| t.clamp(-max_yaw, max_yaw))
    }

    fn leg_length(&mut self, min: u32, max: u32) -> u32 {
        self.legs.pop_front().map_or(min, |l| l.clamp(min, max))
    }
}
