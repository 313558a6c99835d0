//! Vertex and instance types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Per-segment data for instanced circle rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SegmentInstance {
    pub center: [f32; 2],
    pub radius: f32,
    /// Grey level of the fill, 0.0 = black
    pub shade: f32,
    pub stroke_width: f32,
}

/// Colors for worm rendering
pub mod colors {
    pub const OUTLINE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    /// Fill for a segment of the given weight
    pub fn shade(weight: f32) -> [f32; 4] {
        let v = weight.clamp(0.0, 1.0);
        [v, v, v, 1.0]
    }
}
