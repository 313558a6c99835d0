//! Shape generation for worm frames
//!
//! Segments are emitted tail first so head-ward circles overlap the ones
//! behind them.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{SegmentInstance, Vertex, colors};
use crate::sim::Segment;

/// Triangles per circle
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Segments in draw order: tail (last) to head (first)
pub fn draw_order(segments: &[Segment]) -> impl Iterator<Item = &Segment> {
    segments.iter().rev()
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let point = |r: f32, theta: f32| Vec2::new(center.x + r * theta.cos(), center.y + r * theta.sin());

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = point(inner_radius, theta1);
        let outer1 = point(outer_radius, theta1);
        let inner2 = point(inner_radius, theta2);
        let outer2 = point(outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Triangle list for a whole frame: per segment a shaded disc plus an outline
/// centred on its edge
pub fn worm_mesh(segments: &[Segment], radius: f32, stroke_width: f32) -> Vec<Vertex> {
    let per_segment = (CIRCLE_SEGMENTS * 3 + CIRCLE_SEGMENTS * 6) as usize;
    let mut vertices = Vec::with_capacity(segments.len() * per_segment);
    let half_stroke = stroke_width / 2.0;

    for segment in draw_order(segments) {
        vertices.extend(circle(
            segment.center,
            radius,
            colors::shade(segment.weight),
            CIRCLE_SEGMENTS,
        ));
        if stroke_width > 0.0 {
            vertices.extend(ring(
                segment.center,
                (radius - half_stroke).max(0.0),
                radius + half_stroke,
                colors::OUTLINE,
                CIRCLE_SEGMENTS,
            ));
        }
    }

    vertices
}

/// One instance per segment, tail first, for instanced circle pipelines
pub fn segment_instances(segments: &[Segment], radius: f32, stroke_width: f32) -> Vec<SegmentInstance> {
    draw_order(segments)
        .map(|segment| SegmentInstance {
            center: segment.center.to_array(),
            radius,
            shade: segment.weight,
            stroke_width,
        })
        .collect()
}

/// Raw bytes of an instance list, ready for a vertex buffer upload
pub fn instance_bytes(instances: &[SegmentInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
