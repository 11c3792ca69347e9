//! Shards thrown out by the explosion

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::entity::{Animated, TickCtx};
use crate::consts::FULL_OPACITY;
use crate::polar_to_cartesian;

/// Outline vertex count
pub const SHARD_SIDES: usize = 5;

/// A fading, decelerating pentagon
#[derive(Debug, Clone)]
pub struct Shard {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 0..255, expired once it reaches zero
    pub opacity: f32,
    /// Per-vertex radius factors, re-rolled each tick for a flickering edge
    pub outline_factors: [f32; SHARD_SIDES],
    /// Velocity multiplier per tick
    damping: f32,
    /// Opacity lost per tick
    fade: f32,
}

impl Shard {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, damping: f32, fade: f32, rng: &mut R) -> Self {
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(5.0..15.0);
        let mut shard = Self {
            pos,
            vel: polar_to_cartesian(speed, angle),
            size: rng.random_range(20.0..80.0),
            opacity: FULL_OPACITY,
            outline_factors: [1.0; SHARD_SIDES],
            damping,
            fade,
        };
        shard.reroll_outline(rng);
        shard
    }

    /// Still visible
    #[inline]
    pub fn is_active(&self) -> bool {
        self.opacity > 0.0
    }

    /// Outline in canvas coordinates
    pub fn outline(&self) -> [Vec2; SHARD_SIDES] {
        std::array::from_fn(|i| {
            let angle = i as f32 / SHARD_SIDES as f32 * TAU;
            self.pos + polar_to_cartesian(self.size * self.outline_factors[i], angle)
        })
    }

    fn reroll_outline<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for f in &mut self.outline_factors {
            *f = rng.random_range(0.8..=1.2);
        }
    }
}

impl Animated for Shard {
    fn advance<R: Rng + ?Sized>(&mut self, _ctx: &TickCtx, rng: &mut R) {
        self.pos += self.vel;
        self.vel *= self.damping;
        self.opacity -= self.fade;
        self.reroll_outline(rng);
    }

    fn is_expired(&self) -> bool {
        !self.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ctx() -> TickCtx {
        TickCtx {
            bounds: Vec2::new(800.0, 600.0),
            stage: 10,
        }
    }

    #[test]
    fn test_opacity_decays_by_fixed_amount() {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut shard = Shard::new(Vec2::new(100.0, 100.0), 0.98, 2.0, &mut rng);
        let mut last = shard.opacity;
        while shard.is_active() {
            shard.advance(&ctx(), &mut rng);
            assert!((last - shard.opacity - 2.0).abs() < 1e-4);
            last = shard.opacity;
        }
        assert!(shard.is_expired());
    }

    #[test]
    fn test_fades_out_in_128_ticks() {
        let mut rng = Pcg32::seed_from_u64(22);
        let mut shard = Shard::new(Vec2::ZERO, 0.98, 2.0, &mut rng);
        for _ in 0..127 {
            shard.advance(&ctx(), &mut rng);
        }
        assert!(shard.is_active());
        shard.advance(&ctx(), &mut rng);
        assert!(!shard.is_active());
    }

    #[test]
    fn test_velocity_damping() {
        let mut rng = Pcg32::seed_from_u64(23);
        let mut shard = Shard::new(Vec2::ZERO, 0.98, 2.0, &mut rng);
        let speed = shard.vel.length();
        assert!((5.0..15.0).contains(&speed));
        shard.advance(&ctx(), &mut rng);
        assert!((shard.vel.length() - speed * 0.98).abs() < 1e-3);
        // Moved by the pre-damping velocity
        assert!((shard.pos.length() - speed).abs() < 1e-3);
    }

    #[test]
    fn test_outline_factors_bounded() {
        let mut rng = Pcg32::seed_from_u64(24);
        let mut shard = Shard::new(Vec2::new(50.0, 50.0), 0.98, 2.0, &mut rng);
        for _ in 0..20 {
            shard.advance(&ctx(), &mut rng);
            for f in shard.outline_factors {
                assert!((0.8..=1.2).contains(&f));
            }
        }
        assert_eq!(shard.outline().len(), SHARD_SIDES);
    }
}
