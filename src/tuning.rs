//! Data-driven animation balance
//!
//! Every timing and spawn constant the simulation uses lives here, so a cycle can be
//! shortened or intensified from a JSON file without touching code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Animation balance parameters (all durations in ticks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Highest stage; reaching it triggers the explosion
    pub max_stage: u32,
    /// Ticks between stage advances (~2 sec at 60 fps)
    pub stage_interval: u32,
    /// Darkness approaches its target by this much per tick
    pub darkness_step: f32,
    /// Screen shake magnitude per stage (pixels)
    pub shake_per_stage: f32,

    /// New marks per stage level (stage * this)
    pub marks_per_stage: u32,
    /// Mark base size range (pixels)
    pub mark_min_size: f32,
    pub mark_max_size: f32,

    /// Cracks start spawning at this stage
    pub crack_spawn_stage: u32,
    /// Cracks grow and are drawn from this stage
    pub crack_visible_stage: u32,
    /// New cracks per stage level (stage * this)
    pub cracks_per_stage: u32,

    /// Chance that a stage advance also spawns thoughts
    pub thought_spawn_chance: f64,
    /// Upper bound on thoughts per stage advance
    pub max_thoughts_per_stage: u32,

    /// Shards in the explosion burst
    pub shard_count: u32,
    /// Velocity multiplier per tick
    pub shard_damping: f32,
    /// Opacity lost per tick
    pub shard_fade: f32,

    /// Fall progress gained per tick once fallen
    pub fall_step: f32,
    /// Ticks showing the white screen before darkening
    pub final_sequence_delay: u32,
    /// Ticks over which the fade to black happens
    pub final_fade_duration: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_stage: 10,
            stage_interval: 120,
            darkness_step: 0.5,
            shake_per_stage: 2.0,

            marks_per_stage: 2,
            mark_min_size: 20.0,
            mark_max_size: 80.0,

            crack_spawn_stage: 4,
            crack_visible_stage: 5,
            cracks_per_stage: 1,

            thought_spawn_chance: 0.6,
            max_thoughts_per_stage: 3,

            shard_count: 60,
            shard_damping: 0.98,
            shard_fade: 2.0,

            fall_step: 0.005,
            final_sequence_delay: 180,
            final_fade_duration: 150,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or break the cycle
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.max_stage == 0 {
            return Err(TuningError::Invalid("max_stage must be at least 1".into()));
        }
        if self.stage_interval == 0 {
            return Err(TuningError::Invalid("stage_interval must be at least 1".into()));
        }
        if !(self.darkness_step > 0.0) {
            return Err(TuningError::Invalid("darkness_step must be positive".into()));
        }
        if !(self.shard_fade > 0.0) {
            return Err(TuningError::Invalid("shard_fade must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.shard_damping) {
            return Err(TuningError::Invalid("shard_damping must be within [0, 1]".into()));
        }
        if !(self.fall_step > 0.0) {
            return Err(TuningError::Invalid("fall_step must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.thought_spawn_chance) {
            return Err(TuningError::Invalid(
                "thought_spawn_chance must be within [0, 1]".into(),
            ));
        }
        if !self.shake_per_stage.is_finite() || self.shake_per_stage < 0.0 {
            return Err(TuningError::Invalid(
                "shake_per_stage must be finite and non-negative".into(),
            ));
        }
        if !self.mark_max_size.is_finite()
            || !(self.mark_min_size > 0.0)
            || self.mark_max_size < self.mark_min_size
        {
            return Err(TuningError::Invalid(format!(
                "mark size range {}..{} is empty",
                self.mark_min_size, self.mark_max_size
            )));
        }
        if self
            .final_sequence_delay
            .checked_add(self.final_fade_duration)
            .is_none()
        {
            return Err(TuningError::Invalid(
                "final_sequence_delay + final_fade_duration overflows".into(),
            ));
        }
        Ok(())
    }

    /// Total ticks spent in the fallen phase before the scene resets
    pub fn final_sequence_ticks(&self) -> u32 {
        self.final_sequence_delay
            .saturating_add(self.final_fade_duration)
    }

    /// Darkness overlay target for a stage (0..255)
    pub fn darkness_target(&self, stage: u32) -> f32 {
        crate::map_range(stage as f32, 0.0, self.max_stage as f32, 0.0, 255.0)
    }
}
