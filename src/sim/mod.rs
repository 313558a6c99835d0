//! Deterministic worm simulation
//!
//! All motion logic lives here. This module must stay pure:
//! - One head position per tick
//! - Random draws only through a `TurnSource`
//! - No timer, rendering or platform dependencies

pub mod field;
pub mod random;
pub mod simulator;
pub mod state;
pub mod tick;

pub use field::FieldBounds;
pub use random::{ScriptedTurns, SeededTurns, TurnSource};
pub use simulator::{FrameObserver, WormSimulator};
pub use state::{Segment, WormState};
pub use tick::{TickOutcome, recovery_step, reflect_azimuth_x, reflect_azimuth_y, reflect_component, tick};
