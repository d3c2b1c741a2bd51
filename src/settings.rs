//! User settings and preferences
//!
//! Stored as JSON. Native builds read the file named by `DARTBOARD_SETTINGS`;
//! hosts can also hand in JSON directly.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::BoardLayout;
use crate::consts::*;
use crate::game::TurnTimings;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "DARTBOARD_SETTINGS";

/// Settings load/save failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Scoreboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Turn flow ===
    /// Pause on "Bust!" before the next player is up (ms)
    pub bust_delay_ms: u64,
    /// Pause after the third dart before the next player is up (ms)
    pub turn_complete_delay_ms: u64,

    // === Board ===
    /// Largest board base size in pixels
    pub max_base_size: f32,
    /// Horizontal space kept free beside the board (px)
    pub viewport_margin: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bust_delay_ms: BUST_DELAY_MS,
            turn_complete_delay_ms: TURN_COMPLETE_DELAY_MS,
            max_base_size: MAX_BASE_SIZE,
            viewport_margin: 18.0,
        }
    }
}

impl Settings {
    /// Delays for the turn engine
    pub fn turn_timings(&self) -> TurnTimings {
        TurnTimings {
            bust_delay: Duration::from_millis(self.bust_delay_ms),
            turn_complete_delay: Duration::from_millis(self.turn_complete_delay_ms),
        }
    }

    /// Board layout for a viewport of the given width
    pub fn board_layout(&self, viewport_width: f32) -> BoardLayout {
        BoardLayout::from_available_width(viewport_width - self.viewport_margin, self.max_base_size)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.max_base_size.is_finite() || self.max_base_size <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "max_base_size must be positive, got {}",
                self.max_base_size
            )));
        }
        if !self.viewport_margin.is_finite() || self.viewport_margin < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "viewport_margin must be non-negative, got {}",
                self.viewport_margin
            )));
        }
        Ok(())
    }

    /// Parse and validate settings JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Load from `$DARTBOARD_SETTINGS`, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {e}", Path::new(&path).display());
                Self::default()
            }
        }
    }

    /// No filesystem on the web; the host passes JSON via `from_json`
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}
