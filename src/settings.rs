//! Game settings and preferences
//!
//! Persisted as JSON next to the game, separate from match state (which is
//! never saved).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::sim::Rules;

/// Which flavour of the game to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// One ball, no power-ups
    Classic,
    /// Multi-ball with timed power-ups
    #[default]
    PowerUps,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::PowerUps => "Power-Ups",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Variant::Classic),
            "powerups" | "power-ups" | "power_ups" => Some(Variant::PowerUps),
            _ => None,
        }
    }

    /// Simulation rules for this variant
    pub fn rules(&self) -> Rules {
        match self {
            Variant::Classic => Rules::classic(),
            Variant::PowerUps => Rules::power_ups(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game variant
    pub variant: Variant,
    /// RNG seed; a fresh one is drawn each run when unset
    pub seed: Option<u64>,

    // === HUD ===
    /// Show remaining time of active power-ups
    pub show_effect_timers: bool,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::PowerUps,
            seed: None,
            show_effect_timers: true,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Default settings file name
    const STORAGE_FILE: &'static str = "pongularity_settings.json";
    /// Environment variable overriding the settings path
    const PATH_ENV: &'static str = "PONGULARITY_SETTINGS";

    /// Create settings for a variant (other fields default)
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Where settings are read from and written to
    pub fn path() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::STORAGE_FILE))
    }

    /// Parse settings JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from disk, or defaults when the file is absent
    pub fn load() -> Self {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) {
        let path = Self::path();
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not write {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }

    /// Seed to use for this run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
