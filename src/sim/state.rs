//! Scene state and phase machine types
//!
//! Everything the director mutates lives in one [`SceneState`]. Renderers only ever
//! borrow it immutably.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::crack::Crack;
use super::entity::TickCtx;
use super::figure::Figure;
use super::mark::AnxietyMark;
use super::shard::Shard;
use super::thought::Thought;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the animation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the start button to be clicked
    Idle,
    /// Stage advancing on a timer, marks and cracks spreading
    Escalating,
    /// Shards flying after the final stage
    Exploding,
    /// Figure lies on a white screen that fades to black
    Fallen,
}

/// Complete scene state
#[derive(Debug, Clone)]
pub struct SceneState {
    /// Seed the scene was created with
    pub seed: u64,
    /// Animation balance
    pub tuning: Tuning,
    /// Canvas size in pixels
    pub bounds: Vec2,
    /// Current phase
    pub phase: Phase,
    /// Escalation level, 0..=max_stage
    pub stage: u32,
    /// Ticks since the last stage advance
    pub stage_timer: u32,
    /// Ticks since the scene was created (drives the button pulse; survives resets)
    pub frame: u64,
    /// Overlay alpha (0..255), lags behind the stage
    pub darkness: f32,
    /// Scene translation for this tick
    pub shake_offset: Vec2,
    /// Set once the shard burst has been spawned this cycle
    pub explosion_started: bool,
    /// Ticks spent in the fallen phase
    pub fade_timer: u32,
    /// Last known pointer position (for button hover)
    pub pointer: Option<Vec2>,
    pub marks: Vec<AnxietyMark>,
    pub cracks: Vec<Crack>,
    pub shards: Vec<Shard>,
    pub thoughts: Vec<Thought>,
    pub figure: Figure,
    /// Seeded RNG, the only randomness source in the scene
    pub(crate) rng: Pcg32,
}

impl SceneState {
    /// Create a new scene with default tuning
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self::fresh(seed, bounds, Tuning::default(), Pcg32::seed_from_u64(seed), 0)
    }

    /// Create a new scene with explicit tuning, rejecting values the tick can't run with
    pub fn with_tuning(seed: u64, bounds: Vec2, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::fresh(seed, bounds, tuning, Pcg32::seed_from_u64(seed), 0))
    }

    /// The idle, empty scene every cycle starts from
    fn fresh(seed: u64, bounds: Vec2, tuning: Tuning, rng: Pcg32, frame: u64) -> Self {
        Self {
            seed,
            tuning,
            bounds,
            phase: Phase::Idle,
            stage: 0,
            stage_timer: 0,
            frame,
            darkness: 0.0,
            shake_offset: Vec2::ZERO,
            explosion_started: false,
            fade_timer: 0,
            pointer: None,
            marks: Vec::new(),
            cracks: Vec::new(),
            shards: Vec::new(),
            thoughts: Vec::new(),
            figure: Figure::new(bounds),
            rng,
        }
    }

    /// Return to the idle scene.
    ///
    /// The RNG stream, frame counter, pointer and tuning carry over so the next cycle
    /// differs from the last one but stays reproducible from the seed.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        let pointer = self.pointer;
        *self = Self::fresh(self.seed, self.bounds, self.tuning.clone(), rng, self.frame);
        self.pointer = pointer;
    }

    /// Adopt a new canvas size. Existing entities keep their coordinates.
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        self.figure.anchor = Figure::anchor_for(bounds);
    }

    /// Context handed to entity updates this tick
    pub fn tick_ctx(&self) -> TickCtx {
        TickCtx {
            bounds: self.bounds,
            stage: self.stage,
        }
    }

    /// Scene shake magnitude for the current stage
    pub fn shake_factor(&self) -> f32 {
        self.stage as f32 * self.tuning.shake_per_stage
    }

    /// True while any shard is still visible
    pub fn has_active_shards(&self) -> bool {
        self.shards.iter().any(Shard::is_active)
    }

    /// True when no entity collection holds anything
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
            && self.cracks.is_empty()
            && self.shards.is_empty()
            && self.thoughts.is_empty()
    }

    /// Black overlay alpha during the fallen phase (0 until the delay has passed)
    pub fn fade_alpha(&self) -> f32 {
        let delay = self.tuning.final_sequence_delay as f32;
        let end = self.tuning.final_sequence_ticks() as f32;
        if (self.fade_timer as f32) <= delay {
            return 0.0;
        }
        crate::map_range(self.fade_timer as f32, delay, end, 0.0, 255.0).clamp(0.0, 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_tuning_rejects_invalid() {
        let bounds = Vec2::new(800.0, 600.0);
        let chance = Tuning {
            thought_spawn_chance: 2.0,
            ..Tuning::default()
        };
        assert!(matches!(
            SceneState::with_tuning(1, bounds, chance),
            Err(TuningError::Invalid(_))
        ));
        let overflow = Tuning {
            final_sequence_delay: u32::MAX,
            final_fade_duration: 1,
            ..Tuning::default()
        };
        assert!(SceneState::with_tuning(1, bounds, overflow).is_err());
        assert!(SceneState::with_tuning(1, bounds, Tuning::default()).is_ok());
    }

    #[test]
    fn test_new_scene_is_idle_and_empty() {
        let state = SceneState::new(1, Vec2::new(800.0, 600.0));
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.stage, 0);
        assert!(state.is_empty());
        assert_eq!(state.figure.anchor, Vec2::new(400.0, 450.0));
    }

    #[test]
    fn test_reset_keeps_frame_and_bounds() {
        let mut state = SceneState::new(2, Vec2::new(800.0, 600.0));
        state.frame = 500;
        state.stage = 7;
        state.darkness = 100.0;
        state.phase = Phase::Fallen;
        state.figure.fall_progress = 0.4;
        state.reset();

        assert_eq!(state.frame, 500);
        assert_eq!(state.stage, 0);
        assert_eq!(state.darkness, 0.0);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.figure.fall_progress, 0.0);
        assert_eq!(state.bounds, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_resize_moves_figure() {
        let mut state = SceneState::new(3, Vec2::new(800.0, 600.0));
        state.resize(Vec2::new(1000.0, 1000.0));
        assert_eq!(state.figure.anchor, Vec2::new(500.0, 850.0));
    }

    #[test]
    fn test_fade_alpha_ramp() {
        let mut state = SceneState::new(4, Vec2::new(800.0, 600.0));
        state.fade_timer = 100;
        assert_eq!(state.fade_alpha(), 0.0);
        state.fade_timer = 255;
        assert!((state.fade_alpha() - 127.5).abs() < 1e-3);
        state.fade_timer = 330;
        assert_eq!(state.fade_alpha(), 255.0);
    }
}
