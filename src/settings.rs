//! Game settings and preferences
//!
//! Persisted as JSON next to the player profiles.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Relaxed,
    #[default]
    Standard,
    Abyssal,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Relaxed => "Relaxed",
            DifficultyPreset::Standard => "Standard",
            DifficultyPreset::Abyssal => "Abyssal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(DifficultyPreset::Relaxed),
            "standard" | "normal" => Some(DifficultyPreset::Standard),
            "abyssal" | "hard" => Some(DifficultyPreset::Abyssal),
            _ => None,
        }
    }

    /// Multiplier on oxygen drain
    pub fn drain_scale(&self) -> f32 {
        match self {
            DifficultyPreset::Relaxed => 0.7,
            DifficultyPreset::Standard => 1.0,
            DifficultyPreset::Abyssal => 1.4,
        }
    }

    /// Multiplier on visibility fade
    pub fn fade_scale(&self) -> f32 {
        match self {
            DifficultyPreset::Relaxed => 0.75,
            DifficultyPreset::Standard => 1.0,
            DifficultyPreset::Abyssal => 1.5,
        }
    }
}

/// Failure writing or parsing a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {}", e),
            SettingsError::Parse(e) => write!(f, "settings parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: DifficultyPreset,

    // === Visual Effects ===
    /// Screen shake on pulses and bumps
    pub screen_shake: bool,

    // === Accessibility ===
    /// Reduced motion (suppresses shake)
    pub reduced_motion: bool,

    /// Balance overrides applied before the difficulty preset
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyPreset::Standard,
            screen_shake: true,
            reduced_motion: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        Self {
            difficulty: preset,
            ..Self::default()
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Balance table with the difficulty preset folded in
    pub fn effective_tuning(&self) -> Tuning {
        let mut tuning = self.tuning.clone();
        let drain = self.difficulty.drain_scale();
        let fade = self.difficulty.fade_scale();
        tuning.oxygen_move_drain *= drain;
        tuning.oxygen_idle_drain *= drain;
        tuning.obstacle_fade *= fade;
        tuning.hostile_fade *= fade;
        tuning
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(DifficultyPreset::from_str("HARD"), Some(DifficultyPreset::Abyssal));
        assert_eq!(DifficultyPreset::from_str("relaxed"), Some(DifficultyPreset::Relaxed));
        assert_eq!(DifficultyPreset::from_str("nope"), None);
        assert_eq!(DifficultyPreset::Standard.as_str(), "Standard");
    }

    #[test]
    fn test_standard_preset_keeps_tuning() {
        let settings = Settings::default();
        assert_eq!(settings.effective_tuning(), Tuning::default());
    }

    #[test]
    fn test_abyssal_scales_drain_and_fade() {
        let settings = Settings::from_preset(DifficultyPreset::Abyssal);
        let base = Tuning::default();
        let tuning = settings.effective_tuning();
        assert!(tuning.oxygen_move_drain > base.oxygen_move_drain);
        assert!(tuning.obstacle_fade > base.obstacle_fade);
        assert_eq!(tuning.pulse_cost, base.pulse_cost);
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("echoshift-settings-does-not-exist.json");
        let settings = Settings::load_from(&path);
        assert_eq!(settings.difficulty, DifficultyPreset::Standard);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("echoshift-settings-{}.json", std::process::id()));
        let settings = Settings::from_preset(DifficultyPreset::Relaxed);
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.difficulty, DifficultyPreset::Relaxed);
        let _ = std::fs::remove_file(&path);
    }
}
