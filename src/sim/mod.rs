//! Deterministic scene simulation
//!
//! All animation logic lives here. This module must stay pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod crack;
pub mod entity;
pub mod figure;
pub mod mark;
pub mod shard;
pub mod state;
pub mod thought;
pub mod tick;

pub use crack::Crack;
pub use entity::{Animated, TickCtx, advance_all};
pub use figure::{ArmPose, FallenPose, Figure, Pose, collapse_progress};
pub use mark::{AnxietyMark, MarkVertex};
pub use shard::Shard;
pub use state::{Phase, SceneState};
pub use thought::Thought;
pub use tick::{
    TickInput, advance_stage, start_button_center, start_button_diameter, start_button_hit, tick,
};
