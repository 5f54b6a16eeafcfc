use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use super::store::Store;

/// Key the settings are stored under
pub const SETTINGS_KEY: &str = "settings.json";

/// Player-adjustable settings, both in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound_volume: f32,
    pub game_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_volume: 0.5,
            game_speed: 0.1,
        }
    }
}

fn clamp01(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

impl Settings {
    /// Load from `store`. A missing or unreadable entry yields the defaults.
    pub fn load(store: &impl Store) -> Self {
        match Self::try_load(store) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(err) => {
                warn!("Error loading settings, using defaults: {err:#}");
                Self::default()
            }
        }
    }

    fn try_load(store: &impl Store) -> Result<Option<Self>> {
        let Some(text) = store.read(SETTINGS_KEY)? else {
            return Ok(None);
        };
        let settings: Settings =
            serde_json::from_str(&text).context("Failed to parse settings")?;
        Ok(Some(settings.clamped()))
    }

    pub fn save(&self, store: &impl Store) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        store.write(SETTINGS_KEY, &text)
    }

    /// Both values forced into [0, 1]
    pub fn clamped(self) -> Self {
        Self {
            sound_volume: clamp01(self.sound_volume),
            game_speed: clamp01(self.game_speed),
        }
    }

    pub fn with_volume(self, sound_volume: f32) -> Self {
        Self { sound_volume, ..self }.clamped()
    }

    pub fn with_speed(self, game_speed: f32) -> Self {
        Self { game_speed, ..self }.clamped()
    }
}
