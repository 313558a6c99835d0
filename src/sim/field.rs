//! Field rectangle and the inset area the head may occupy
//!
//! The inset rectangle is the visible field shrunk by `radius + 1` on every
//! side. When the field is too small for that, the bounds on the offending
//! axis collapse onto the field centre, so `min <= max` always holds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::EDGE_MARGIN;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
    /// Segment radius the inset is derived from
    pub radius: f32,
}

impl FieldBounds {
    pub fn new(width: f32, height: f32, radius: f32) -> Self {
        Self {
            width,
            height,
            radius,
        }
    }

    /// Replace both dimensions at once
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    #[inline]
    fn inset(&self) -> f32 {
        self.radius + EDGE_MARGIN
    }

    /// (min, max) along one axis of length `extent`
    #[inline]
    fn axis_bounds(&self, extent: f32) -> (f32, f32) {
        let min = self.inset();
        let max = extent - self.inset();
        if min > max {
            let mid = extent / 2.0;
            (mid, mid)
        } else {
            (min, max)
        }
    }

    pub fn min_x(&self) -> f32 {
        self.axis_bounds(self.width).0
    }

    pub fn max_x(&self) -> f32 {
        self.axis_bounds(self.width).1
    }

    pub fn min_y(&self) -> f32 {
        self.axis_bounds(self.height).0
    }

    pub fn max_y(&self) -> f32 {
        self.axis_bounds(self.height).1
    }

    /// Centre of the visible field
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether `point` lies in the inset rectangle (edges included)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }
}
