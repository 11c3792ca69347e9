//! Anxious - a looping generative animation of escalating anxiety
//!
//! Core modules:
//! - `sim`: Deterministic scene simulation (stage controller, entities, figure, phases)
//! - `renderer`: Canvas abstraction, tessellation and the WebGPU pipeline
//! - `tuning`: Data-driven animation balance
//! - `settings`: Presentation preferences

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Scene configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Canvas size used by the native preview
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;

    /// Figure stands this far above the bottom edge
    pub const FIGURE_BASELINE_OFFSET: f32 = 150.0;

    /// Start button diameter oscillates between these (pixels)
    pub const BUTTON_MIN_DIAMETER: f32 = 20.0;
    pub const BUTTON_MAX_DIAMETER: f32 = 40.0;
    /// Pulse speed in radians per frame
    pub const BUTTON_PULSE_RATE: f32 = 0.2;

    /// Opacity scale used throughout (0..255)
    pub const FULL_OPACITY: f32 = 255.0;

    /// Default stroke width
    pub const STROKE_WIDTH: f32 = 2.0;
    /// Crack stroke width
    pub const CRACK_WIDTH: f32 = 3.0;
}

/// Linearly re-map `value` from one range onto another (no clamping)
#[inline]
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if in_max == in_min {
        return out_min;
    }
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range() {
        assert!((map_range(5.0, 0.0, 10.0, 0.0, 255.0) - 127.5).abs() < 1e-4);
        assert!((map_range(-1.0, -1.0, 1.0, 20.0, 40.0) - 20.0).abs() < 1e-4);
        assert!((map_range(1.0, -1.0, 1.0, 20.0, 40.0) - 40.0).abs() < 1e-4);
        // Degenerate input range collapses to the output start
        assert_eq!(map_range(3.0, 2.0, 2.0, 7.0, 9.0), 7.0);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(10.0, std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-4);
        assert!((p.y - 10.0).abs() < 1e-4);
    }
}
