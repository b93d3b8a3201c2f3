//! Player preferences and accessibility options
//!
//! Persisted separately from any game state as a small JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Accessibility flags, flipped by toggle intents and read by the
/// presentation layer. None of these affect physics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityOptions {
    /// High-contrast palette
    pub high_contrast: bool,
    /// Larger HUD text
    pub large_hud: bool,
    /// Alternative key-binding set (the input shell interprets this)
    pub alternative_bindings: bool,
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub accessibility: AccessibilityOptions,
    /// Start sessions with time-trial mode enabled
    pub time_trial_mode: bool,
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults on a
    /// missing or malformed file.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("malformed settings file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save_to(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("failed to serialize settings: {err}");
                return;
            }
        };
        match fs::write(path, json) {
            Ok(()) => log::info!("settings saved to {}", path.display()),
            Err(err) => log::warn!("failed to write {}: {err}", path.display()),
        }
    }
}
