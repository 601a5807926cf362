//! Game settings and tuning
//!
//! Persisted as JSON in LocalStorage on the web, read from a file natively.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How much simulated time each animation frame covers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FrameTiming {
    /// One reference frame per display refresh, whatever the refresh rate
    #[default]
    PerFrame,
    /// Scale motion by elapsed wall time relative to `reference_hz`
    Elapsed { reference_hz: f32 },
}

impl FrameTiming {
    /// dt_scale for a frame that took `elapsed_s` seconds
    pub fn dt_scale(&self, elapsed_s: f32) -> f32 {
        match *self {
            FrameTiming::PerFrame => 1.0,
            FrameTiming::Elapsed { reference_hz } => {
                let scale = elapsed_s * reference_hz;
                if scale.is_finite() {
                    scale.clamp(0.0, MAX_DT_SCALE)
                } else {
                    1.0
                }
            }
        }
    }
}

/// Kinematic constants for both entities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub player_radius: f32,
    pub player_speed: f32,
    pub ball_radius: f32,
    /// Per-frame velocity multiplier, in (0, 1]
    pub ball_friction: f32,
    pub max_speed: f32,
    pub kick_multiplier: f32,
    pub push_strength: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            ball_radius: BALL_RADIUS,
            ball_friction: BALL_FRICTION,
            max_speed: MAX_SPEED,
            kick_multiplier: KICK_MULTIPLIER,
            push_strength: PUSH_STRENGTH,
        }
    }
}

/// RGBA colors, components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub field: [f32; 4],
    pub halfway_line: [f32; 4],
    pub halfway_line_width: f32,
    pub ball: [f32; 4],
    pub player: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            field: [0.298, 0.686, 0.314, 1.0],        // #4CAF50
            halfway_line: [1.0, 1.0, 1.0, 0.5],
            halfway_line_width: 2.0,
            ball: [1.0, 1.0, 1.0, 1.0],               // #FFFFFF
            player: [1.0, 0.922, 0.231, 1.0],         // #FFEB3B
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsTuning,
    pub palette: Palette,
    pub timing: FrameTiming,
    /// Force the on-screen controls on or off (None = detect from device)
    pub touch_controls: Option<bool>,
    /// Log per-frame contact events at debug level
    pub log_events: bool,
}

/// Why a settings document was rejected
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("settings rejected: {0}")]
    Invalid(&'static str),
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "kickabout_settings";

    /// Parse and validate a JSON settings document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let p = &self.physics;
        let finite = [
            p.player_radius,
            p.player_speed,
            p.ball_radius,
            p.ball_friction,
            p.max_speed,
            p.kick_multiplier,
            p.push_strength,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(SettingsError::Invalid("physics values must be finite"));
        }
        if p.player_radius <= 0.0 || p.ball_radius <= 0.0 {
            return Err(SettingsError::Invalid("radii must be positive"));
        }
        if p.player_speed <= 0.0 || p.max_speed <= 0.0 {
            return Err(SettingsError::Invalid("speeds must be positive"));
        }
        if !(p.ball_friction > 0.0 && p.ball_friction <= 1.0) {
            return Err(SettingsError::Invalid("ball friction must be in (0, 1]"));
        }
        if let FrameTiming::Elapsed { reference_hz } = self.timing {
            if !(reference_hz.is_finite() && reference_hz > 0.0) {
                return Err(SettingsError::Invalid("reference_hz must be positive"));
            }
        }
        Ok(())
    }

    /// Parse settings, falling back to defaults (with a warning) on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only).
    /// When nothing is stored yet the defaults are written back, so they can
    /// be edited in place.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = &storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        let settings = Self::default();
        if storage.is_some() {
            settings.save();
        }
        settings
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match storage.set_item(Self::STORAGE_KEY, &self.to_json()) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Cannot save settings: {e:?}"),
            }
        }
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json_or_default(&json)
            }
            Err(e) => {
                log::warn!("Cannot read {}: {e}; using default settings", path.display());
                Self::default()
            }
        }
    }
}
