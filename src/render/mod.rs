//! Renderer-agnostic frame output
//!
//! Turns a head-first segment list into triangle-list vertices or per-segment
//! instance data. No GPU or window code lives here.

pub mod shapes;
pub mod vertex;

pub use shapes::{draw_order, segment_instances, worm_mesh};
pub use vertex::{SegmentInstance, Vertex};
