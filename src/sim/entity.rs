//! Common interface for the procedural entities
//!
//! Marks, cracks, shards and thoughts all advance once per tick and may expire.
//! Collections are advanced through [`advance_all`], which prunes expired entries.

use glam::Vec2;
use rand::Rng;

/// Per-tick context shared by every entity update
#[derive(Debug, Clone, Copy)]
pub struct TickCtx {
    /// Canvas size in pixels
    pub bounds: Vec2,
    /// Current escalation stage
    pub stage: u32,
}

impl TickCtx {
    /// True if `p` lies strictly inside the canvas
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > 0.0 && p.x < self.bounds.x && p.y > 0.0 && p.y < self.bounds.y
    }
}

/// An animated shape that updates itself once per tick
pub trait Animated {
    /// Advance one tick
    fn advance<R: Rng + ?Sized>(&mut self, ctx: &TickCtx, rng: &mut R);

    /// Expired entities are dropped from their collection
    fn is_expired(&self) -> bool {
        false
    }
}

/// Advance every entity, then drop the ones that expired
pub fn advance_all<T: Animated, R: Rng + ?Sized>(items: &mut Vec<T>, ctx: &TickCtx, rng: &mut R) {
    for item in items.iter_mut() {
        item.advance(ctx, rng);
    }
    items.retain(|item| !item.is_expired());
}

/// Uniform sample in `[-amount, amount]` (zero when `amount` is zero)
#[inline]
pub(crate) fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f32) -> f32 {
    if amount <= 0.0 {
        return 0.0;
    }
    rng.random_range(-amount..=amount)
}

/// Uniform random point inside the canvas
#[inline]
pub(crate) fn random_point<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..=bounds.x.max(0.0)),
        rng.random_range(0.0..=bounds.y.max(0.0)),
    )
}
