//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in local coordinates.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

#[inline]
fn push_quad(vertices: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    // a-b on one edge, c-d on the opposite edge
    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));

    vertices.push(Vertex::new(c.x, c.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(d.x, d.y, color));
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    let max = origin + size;
    push_quad(
        &mut vertices,
        origin,
        Vec2::new(origin.x, max.y),
        Vec2::new(max.x, origin.y),
        max,
        color,
    );
    vertices
}

/// Generate vertices for a filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for an ellipse outline of the given stroke width
pub fn ellipse_ring(
    center: Vec2,
    radii: Vec2,
    width: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let inner = (radii - Vec2::splat(width / 2.0)).max(Vec2::ZERO);
    let outer = radii + Vec2::splat(width / 2.0);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        // Two triangles per segment
        push_quad(
            &mut vertices,
            center + inner * dir1,
            center + outer * dir1,
            center + inner * dir2,
            center + outer * dir2,
            color,
        );
    }

    vertices
}

/// Fill a polygon by fanning from its centroid.
///
/// Correct for convex and star-shaped outlines, which is all the scene draws.
pub fn fan(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
    let mut vertices = Vec::with_capacity(points.len() * 3);

    for (i, &p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        vertices.push(Vertex::new(centroid.x, centroid.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Generate vertices for a stroked polyline (one quad per segment)
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4], closed: bool) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let segment_count = if closed { points.len() } else { points.len() - 1 };
    let mut vertices = Vec::with_capacity(segment_count * 6);
    let half = width / 2.0;

    for i in 0..segment_count {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];

        // Direction from p1 to p2
        let dir = (p2 - p1).normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        // Perpendicular for width
        let perp = Vec2::new(-dir.y, dir.x) * half;
        // Extend each end by half the width so joints overlap
        let p1 = p1 - dir * half;
        let p2 = p2 + dir * half;

        push_quad(&mut vertices, p1 + perp, p1 - perp, p2 + perp, p2 - perp, color);
    }

    vertices
}
