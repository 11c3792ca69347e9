//! Anxiety marks: irregular red polygons whose outline never sits still

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::entity::{Animated, TickCtx, jitter};
use crate::polar_to_cartesian;

/// Vertex radius is clamped to `size * [MIN, MAX]`
pub const MARK_RADIUS_MIN: f32 = 0.7;
pub const MARK_RADIUS_MAX: f32 = 1.3;
/// Per-vertex display jitter (pixels)
pub const MARK_DISPLAY_JITTER: f32 = 3.0;
/// Base radius wobble per tick, grows by `MARK_DISTORTION_PER_STAGE` per stage
const MARK_BASE_DISTORTION: f32 = 0.5;
const MARK_DISTORTION_PER_STAGE: f32 = 0.1;

/// One polygon vertex in polar form around the mark center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkVertex {
    pub angle: f32,
    pub radius: f32,
    /// Display-only offset, re-rolled each tick
    pub jitter: Vec2,
}

/// A jittering polygon
#[derive(Debug, Clone)]
pub struct AnxietyMark {
    pub center: Vec2,
    pub size: f32,
    pub vertices: Vec<MarkVertex>,
}

impl AnxietyMark {
    pub fn new<R: Rng + ?Sized>(center: Vec2, size: f32, rng: &mut R) -> Self {
        let count = rng.random_range(5..10);
        let vertices = (0..count)
            .map(|i| MarkVertex {
                angle: i as f32 / count as f32 * TAU,
                radius: size * rng.random_range(0.8..1.2),
                jitter: Vec2::ZERO,
            })
            .collect();

        Self {
            center,
            size,
            vertices,
        }
    }

    /// Allowed vertex radius band
    #[inline]
    pub fn radius_band(&self) -> (f32, f32) {
        (self.size * MARK_RADIUS_MIN, self.size * MARK_RADIUS_MAX)
    }

    /// Outline in canvas coordinates, display jitter included
    pub fn outline(&self) -> Vec<Vec2> {
        self.vertices
            .iter()
            .map(|v| self.center + polar_to_cartesian(v.radius, v.angle) + v.jitter)
            .collect()
    }
}

impl Animated for AnxietyMark {
    fn advance<R: Rng + ?Sized>(&mut self, ctx: &TickCtx, rng: &mut R) {
        let distortion = MARK_BASE_DISTORTION + ctx.stage as f32 * MARK_DISTORTION_PER_STAGE;
        let (min_r, max_r) = self.radius_band();
        for v in &mut self.vertices {
            v.radius = (v.radius + jitter(rng, distortion)).clamp(min_r, max_r);
            v.jitter = Vec2::new(
                jitter(rng, MARK_DISPLAY_JITTER),
                jitter(rng, MARK_DISPLAY_JITTER),
            );
        }
    }
}
