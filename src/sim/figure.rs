//! The stick figure at the center of the room
//!
//! Posture is derived, never stored: [`Pose::from_collapse`] and
//! [`FallenPose::new`] are pure functions of the progress values, so the renderer
//! and the tests see exactly the same geometry.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8};

use super::entity::jitter;
use crate::consts::FIGURE_BASELINE_OFFSET;
use crate::map_range;

/// Arms switch from raised to collapsed at this collapse progress
pub const ARM_COLLAPSE_THRESHOLD: f32 = 0.7;
/// Twitch phase advance per tick
const TWITCH_RATE: f32 = 0.6;
/// Vertical drop of the fully fallen figure (pixels)
pub const FALL_DROP: f32 = 20.0;

/// Arm configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArmPose {
    /// Arms out from the shoulders at `angle` below horizontal
    Raised { angle: f32 },
    /// Hands clutched together over the head
    Collapsed,
}

/// Standing (collapsing) posture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Whole-body rotation (radians, 0 = upright)
    pub rotation: f32,
    pub arms: ArmPose,
    /// Leg spread angle below horizontal
    pub leg_angle: f32,
}

impl Pose {
    /// Posture for a collapse progress in [0, 1]
    pub fn from_collapse(collapse: f32) -> Self {
        let collapse = collapse.clamp(0.0, 1.0);
        let arms = if collapse < ARM_COLLAPSE_THRESHOLD {
            ArmPose::Raised {
                angle: map_range(collapse, 0.0, 1.0, FRAC_PI_4, FRAC_PI_2),
            }
        } else {
            ArmPose::Collapsed
        };

        Self {
            rotation: standing_angle(collapse),
            arms,
            leg_angle: map_range(collapse, 0.0, 1.0, FRAC_PI_8, FRAC_PI_2),
        }
    }
}

/// Posture after the explosion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallenPose {
    pub rotation: f32,
    /// Downward offset applied after rotation
    pub drop: f32,
}

impl FallenPose {
    /// Interpolates from the last standing angle to fully prone
    pub fn new(collapse: f32, fall: f32) -> Self {
        let fall = fall.clamp(0.0, 1.0);
        let start = standing_angle(collapse);
        Self {
            rotation: map_range(fall, 0.0, 1.0, start, FRAC_PI_2),
            drop: FALL_DROP * fall,
        }
    }
}

#[inline]
fn standing_angle(collapse: f32) -> f32 {
    map_range(collapse.clamp(0.0, 1.0), 0.0, 1.0, 0.0, FRAC_PI_2)
}

/// Collapse progress for a stage: `clamp(stage / max_stage, 0, 1)`
#[inline]
pub fn collapse_progress(stage: u32, max_stage: u32) -> f32 {
    if max_stage == 0 {
        return 1.0;
    }
    (stage as f32 / max_stage as f32).clamp(0.0, 1.0)
}

/// The figure's animated state
#[derive(Debug, Clone)]
pub struct Figure {
    /// Feet position when standing still
    pub anchor: Vec2,
    /// 0 = standing, 1 = fully collapsed
    pub collapse_progress: f32,
    /// 0 = not fallen, 1 = lying flat
    pub fall_progress: f32,
    pub twitch_phase: f32,
    /// Nervous tremor applied to the draw origin
    pub twitch_offset: Vec2,
}

impl Figure {
    /// A standing figure, centered near the bottom of the canvas
    pub fn new(bounds: Vec2) -> Self {
        Self {
            anchor: Self::anchor_for(bounds),
            collapse_progress: 0.0,
            fall_progress: 0.0,
            twitch_phase: 0.0,
            twitch_offset: Vec2::ZERO,
        }
    }

    pub fn anchor_for(bounds: Vec2) -> Vec2 {
        Vec2::new(bounds.x / 2.0, bounds.y - FIGURE_BASELINE_OFFSET)
    }

    /// Follow the stage; `shake` is the current scene shake magnitude
    pub fn update<R: Rng + ?Sized>(&mut self, stage: u32, max_stage: u32, shake: f32, rng: &mut R) {
        self.collapse_progress = collapse_progress(stage, max_stage);
        self.twitch_phase += TWITCH_RATE;

        let wave = Vec2::new(self.twitch_phase.sin(), (self.twitch_phase * 1.3).cos()) * shake * 0.5;
        let noise = Vec2::new(jitter(rng, shake), jitter(rng, shake));
        self.twitch_offset = (wave + noise) * self.collapse_progress;
    }

    /// Step toward lying flat
    pub fn fall_down(&mut self, step: f32) {
        if self.fall_progress < 1.0 {
            self.fall_progress = (self.fall_progress + step).min(1.0);
        }
    }

    /// Current standing posture
    pub fn pose(&self) -> Pose {
        Pose::from_collapse(self.collapse_progress)
    }

    /// Current fallen posture
    pub fn fallen_pose(&self) -> FallenPose {
        FallenPose::new(self.collapse_progress, self.fall_progress)
    }

    /// Draw origin while standing (anchor plus tremor)
    pub fn origin(&self) -> Vec2 {
        self.anchor + self.twitch_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_collapse_progress() {
        assert_eq!(collapse_progress(0, 10), 0.0);
        assert_eq!(collapse_progress(5, 10), 0.5);
        assert_eq!(collapse_progress(10, 10), 1.0);
        assert_eq!(collapse_progress(12, 10), 1.0);
    }

    #[test]
    fn test_pose_arm_threshold() {
        assert!(matches!(Pose::from_collapse(0.6).arms, ArmPose::Raised { .. }));
        assert_eq!(Pose::from_collapse(0.7).arms, ArmPose::Collapsed);
        assert_eq!(Pose::from_collapse(1.0).arms, ArmPose::Collapsed);
    }

    #[test]
    fn test_pose_extremes() {
        let upright = Pose::from_collapse(0.0);
        assert_eq!(upright.rotation, 0.0);
        assert_eq!(upright.arms, ArmPose::Raised { angle: FRAC_PI_4 });
        assert!((upright.leg_angle - FRAC_PI_8).abs() < 1e-6);

        let collapsed = Pose::from_collapse(1.0);
        assert!((collapsed.rotation - FRAC_PI_2).abs() < 1e-6);
        assert!((collapsed.leg_angle - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_fallen_pose_interpolates() {
        let start = FallenPose::new(0.5, 0.0);
        assert!((start.rotation - FRAC_PI_4).abs() < 1e-6);
        assert_eq!(start.drop, 0.0);

        let end = FallenPose::new(0.5, 1.0);
        assert!((end.rotation - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(end.drop, FALL_DROP);
    }

    #[test]
    fn test_fall_down_saturates() {
        let mut figure = Figure::new(Vec2::new(800.0, 600.0));
        let mut last = figure.fall_progress;
        for _ in 0..300 {
            figure.fall_down(0.005);
            assert!(figure.fall_progress >= last);
            last = figure.fall_progress;
        }
        assert_eq!(figure.fall_progress, 1.0);
    }

    #[test]
    fn test_no_twitch_while_calm() {
        let mut rng = Pcg32::seed_from_u64(41);
        let mut figure = Figure::new(Vec2::new(800.0, 600.0));
        figure.update(0, 10, 0.0, &mut rng);
        assert_eq!(figure.twitch_offset, Vec2::ZERO);
        assert_eq!(figure.origin(), Vec2::new(400.0, 450.0));
    }

    proptest! {
        #[test]
        fn prop_twitch_bounded(seed in any::<u64>(), stage in 0u32..=10, ticks in 1usize..50) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut figure = Figure::new(Vec2::new(800.0, 600.0));
            let shake = stage as f32 * 2.0;
            for _ in 0..ticks {
                figure.update(stage, 10, shake, &mut rng);
                prop_assert_eq!(figure.collapse_progress, collapse_progress(stage, 10));
                let limit = 1.5 * shake * figure.collapse_progress + 1e-3;
                prop_assert!(figure.twitch_offset.x.abs() <= limit);
                prop_assert!(figure.twitch_offset.y.abs() <= limit);
            }
        }
    }
}
