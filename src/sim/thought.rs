//! Thoughts: small pulsing bubbles that drift and fade

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::entity::{Animated, TickCtx};
use crate::consts::FULL_OPACITY;
use crate::polar_to_cartesian;

/// Lifespan range in ticks
const THOUGHT_MIN_LIFESPAN: u32 = 120;
const THOUGHT_MAX_LIFESPAN: u32 = 300;
/// Drift speed range (pixels per tick)
const THOUGHT_MIN_SPEED: f32 = 0.2;
const THOUGHT_MAX_SPEED: f32 = 0.8;
/// Pulse frequency (radians per tick) and relative amplitude
const THOUGHT_PULSE_RATE: f32 = 0.1;
const THOUGHT_PULSE_AMOUNT: f32 = 0.15;

/// A drifting thought bubble
#[derive(Debug, Clone)]
pub struct Thought {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Unpulsed bubble radius
    pub base_size: f32,
    pub age: u32,
    pub lifespan: u32,
}

impl Thought {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        let heading = rng.random_range(0.0..TAU);
        let speed = rng.random_range(THOUGHT_MIN_SPEED..THOUGHT_MAX_SPEED);
        Self {
            pos,
            vel: polar_to_cartesian(speed, heading),
            base_size: rng.random_range(8.0..20.0),
            age: 0,
            lifespan: rng.random_range(THOUGHT_MIN_LIFESPAN..=THOUGHT_MAX_LIFESPAN),
        }
    }

    /// Full at birth, zero at end of life
    pub fn opacity(&self) -> f32 {
        let t = (self.age as f32 / self.lifespan.max(1) as f32).clamp(0.0, 1.0);
        FULL_OPACITY * (1.0 - t)
    }

    /// Current radius including the pulse
    pub fn size(&self) -> f32 {
        let pulse = (self.age as f32 * THOUGHT_PULSE_RATE).sin() * THOUGHT_PULSE_AMOUNT;
        self.base_size * (1.0 + pulse)
    }
}

impl Animated for Thought {
    fn advance<R: Rng + ?Sized>(&mut self, _ctx: &TickCtx, _rng: &mut R) {
        self.pos += self.vel;
        self.age = self.age.saturating_add(1);
    }

    fn is_expired(&self) -> bool {
        self.opacity() <= 0.0
    }
}
