//! Cracks: single random-walk lines that creep across the canvas

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::entity::{Animated, TickCtx};

/// A growing crack (no branching, never shrinks)
#[derive(Debug, Clone)]
pub struct Crack {
    pub origin: Vec2,
    /// Walk so far, starting at `origin`
    pub points: Vec<Vec2>,
    /// Step length per tick (pixels)
    pub growth_speed: f32,
    /// Growth halts once this many points exist
    pub max_length: usize,
}

impl Crack {
    pub fn new<R: Rng + ?Sized>(origin: Vec2, rng: &mut R) -> Self {
        Self {
            origin,
            points: vec![origin],
            growth_speed: rng.random_range(10.0..20.0),
            max_length: rng.random_range(200..=500),
        }
    }

    /// True once the walk has reached its length limit
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.points.len() >= self.max_length
    }

    /// Try to append one point in a random direction.
    ///
    /// Candidates outside the canvas are dropped; the crack just waits a tick.
    pub fn expand<R: Rng + ?Sized>(&mut self, ctx: &TickCtx, rng: &mut R) {
        if self.is_complete() {
            return;
        }
        let Some(&last) = self.points.last() else {
            return;
        };

        let angle = rng.random_range(0.0..TAU);
        let next = last + Vec2::new(angle.cos(), angle.sin()) * self.growth_speed;
        if ctx.contains(next) {
            self.points.push(next);
        }
    }
}

impl Animated for Crack {
    fn advance<R: Rng + ?Sized>(&mut self, ctx: &TickCtx, rng: &mut R) {
        self.expand(ctx, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ctx(w: f32, h: f32) -> TickCtx {
        TickCtx {
            bounds: Vec2::new(w, h),
            stage: 5,
        }
    }

    #[test]
    fn test_new_crack() {
        let mut rng = Pcg32::seed_from_u64(11);
        let crack = Crack::new(Vec2::new(40.0, 40.0), &mut rng);
        assert_eq!(crack.points, vec![Vec2::new(40.0, 40.0)]);
        assert!((10.0..20.0).contains(&crack.growth_speed));
        assert!((200..=500).contains(&crack.max_length));
    }

    #[test]
    fn test_growth_halts_at_max_length() {
        let mut rng = Pcg32::seed_from_u64(12);
        let mut crack = Crack::new(Vec2::new(500.0, 500.0), &mut rng);
        crack.max_length = 5;
        for _ in 0..200 {
            crack.advance(&ctx(1000.0, 1000.0), &mut rng);
        }
        assert_eq!(crack.points.len(), 5);
        assert!(crack.is_complete());
    }

    #[test]
    fn test_tiny_canvas_rejects_every_step() {
        let mut rng = Pcg32::seed_from_u64(13);
        let mut crack = Crack::new(Vec2::new(2.0, 2.0), &mut rng);
        // Every step is at least 10 px, so nothing fits in a 4x4 canvas
        for _ in 0..50 {
            crack.advance(&ctx(4.0, 4.0), &mut rng);
        }
        assert_eq!(crack.points.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_points_stay_in_canvas(
            seed in any::<u64>(),
            w in 50.0f32..1200.0,
            h in 50.0f32..900.0,
            ticks in 0usize..600,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let ctx = ctx(w, h);
            let mut crack = Crack::new(Vec2::new(w / 2.0, h / 2.0), &mut rng);
            let mut last_len = crack.points.len();
            for _ in 0..ticks {
                crack.advance(&ctx, &mut rng);
                prop_assert!(crack.points.len() >= last_len);
                prop_assert!(crack.points.len() <= crack.max_length);
                last_len = crack.points.len();
            }
            for p in crack.points.iter().skip(1) {
                prop_assert!(p.x >= 0.0 && p.x <= w);
                prop_assert!(p.y >= 0.0 && p.y <= h);
            }
        }
    }
}
