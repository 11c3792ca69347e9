//! Presentation preferences
//!
//! Read from LocalStorage on the web. None of these change the simulation, only
//! how a frame is drawn.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Segments used to tessellate ellipses
    pub fn ellipse_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 24,
            QualityPreset::High => 48,
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tessellation quality
    pub quality: QualityPreset,
    /// Apply the stage-driven scene shake
    pub screen_shake: bool,
    /// Draw drifting thoughts
    pub thoughts: bool,
    /// Scale applied to every stroke width
    pub stroke_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            screen_shake: true,
            thoughts: true,
            stroke_scale: 1.0,
        }
    }
}

impl Settings {
    /// Ellipse tessellation for the current preset
    pub fn ellipse_segments(&self) -> u32 {
        self.quality.ellipse_segments()
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "anxious_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_scale_with_quality() {
        let low = Settings {
            quality: QualityPreset::Low,
            ..Settings::default()
        };
        assert!(low.ellipse_segments() < Settings::default().ellipse_segments());
        assert_eq!(QualityPreset::High.ellipse_segments(), 48);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_preset_names_in_json() {
        let settings: Settings = serde_json::from_str(r#"{ "quality": "High" }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(serde_json::from_str::<Settings>(r#"{ "quality": "Ultra" }"#).is_err());
    }

    #[test]
    fn test_settings_json_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "screen_shake": false }"#).unwrap();
        assert!(!settings.screen_shake);
        assert!(settings.thoughts);
        assert_eq!(settings.quality, QualityPreset::Medium);
    }
}
