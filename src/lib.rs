//! Wandering Worm - a segmented worm random-walking inside a bounded field
//!
//! Core modules:
//! - `sim`: Deterministic motion model (chain state, tick, field bounds, randomness)
//! - `scheduler`: Periodic tick sources (thread-backed or host-driven)
//! - `controller`: Start/stop/resize plumbing between a host and the simulator
//! - `render`: Renderer-agnostic mesh and instance data for a frame
//! - `settings`: Tunable constants loaded from JSON

pub mod controller;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use controller::{RunState, WormController};
pub use settings::{ConfigError, WormConfig};

/// Default worm tuning
pub mod consts {
    /// Number of segments in the chain
    pub const SEGMENT_COUNT: usize = 40;
    /// Segment circle radius (pixels)
    pub const SEGMENT_RADIUS: f32 = 15.0;
    /// Distance the head travels per tick (pixels)
    pub const STEP_LENGTH: f32 = 10.0;
    /// Shortest leg before the next random turn (ticks)
    pub const MIN_STEPS_BEFORE_TURN: u32 = 3;
    /// Longest leg before the next random turn (ticks)
    pub const MAX_STEPS_BEFORE_TURN: u32 = 5;
    /// Largest turn per leg, either direction (degrees, 0..=180)
    pub const MAX_YAW: i32 = 90;
    /// Tick period (milliseconds)
    pub const PACE_MS: u64 = 70;
    /// Heading before the first leg is drawn (degrees)
    pub const INITIAL_AZIMUTH: i32 = 315;
    /// Outline width of each segment circle
    pub const STROKE_WIDTH: f32 = 2.0;
    /// Extra margin between the segment edge and the field edge
    pub const EDGE_MARGIN: f32 = 1.0;
}

/// Normalize an azimuth in degrees to [0, 360)
#[inline]
pub fn normalize_azimuth(azimuth: i32) -> i32 {
    azimuth.rem_euclid(360)
}

/// Step vector of length `step_length` pointing along `azimuth` degrees
#[inline]
pub fn step_vector(azimuth: i32, step_length: f32) -> glam::Vec2 {
    let radians = (azimuth as f32).to_radians();
    glam::Vec2::new(step_length * radians.cos(), step_length * radians.sin())
}
