//! Worm state and core simulation types
//!
//! Everything `tick` reads or writes, kept as one plain record so two states
//! can be compared directly in determinism checks.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::normalize_azimuth;
use crate::settings::WormConfig;

/// One segment as handed to a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub center: Vec2,
    /// 0.0 at the head, approaching 1.0 at the tail
    pub weight: f32,
}

/// Complete worm state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WormState {
    /// Segment centres, head first. Length never changes.
    pub positions: VecDeque<Vec2>,
    /// Per-index shade, assigned once at construction
    pub weights: Vec<f32>,
    /// Heading in degrees, always in [0, 360)
    pub azimuth: i32,
    /// Offset applied to the head each tick of the current leg
    pub step: Vec2,
    /// Ticks left before the next turn
    pub steps_left: u32,
    /// Ticks applied so far
    pub time_ticks: u64,
}

impl WormState {
    /// Lay the chain out on a diagonal, each segment one step further up-left
    pub fn new(config: &WormConfig) -> Self {
        let count = config.segment_count;
        let positions = (0..count)
            .map(|i| {
                let coordinate = config.radius - config.step_length * i as f32;
                Vec2::new(coordinate, coordinate)
            })
            .collect();

        Self {
            positions,
            weights: Self::gradient(count),
            azimuth: normalize_azimuth(config.initial_azimuth),
            step: Vec2::ZERO,
            steps_left: 0,
            time_ticks: 0,
        }
    }

    /// State with an explicit chain and heading; weights follow the chain length
    pub fn with_chain(positions: impl IntoIterator<Item = Vec2>, azimuth: i32, step: Vec2, steps_left: u32) -> Self {
        let positions: VecDeque<Vec2> = positions.into_iter().collect();
        let weights = Self::gradient(positions.len());
        Self {
            positions,
            weights,
            azimuth: normalize_azimuth(azimuth),
            step,
            steps_left,
            time_ticks: 0,
        }
    }

    /// Index i gets i / count
    fn gradient(count: usize) -> Vec<f32> {
        (0..count).map(|i| i as f32 / count as f32).collect()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn head(&self) -> Vec2 {
        self.positions.front().copied().unwrap_or(Vec2::ZERO)
    }

    pub fn tail(&self) -> Vec2 {
        self.positions.back().copied().unwrap_or(Vec2::ZERO)
    }

    /// Insert a new head and drop the tail, keeping the length fixed
    pub fn advance_head(&mut self, head: Vec2) {
        self.positions.push_front(head);
        self.positions.pop_back();
        self.time_ticks += 1;
    }

    /// Head-first (centre, weight) pairs
    pub fn segments(&self) -> Vec<Segment> {
        self.positions
            .iter()
            .zip(&self.weights)
            .map(|(&center, &weight)| Segment { center, weight })
            .collect()
    }
}
