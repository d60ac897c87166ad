//! Game settings
//!
//! Read once at startup. The page query string can switch on the debug
//! overlay (`?debug=true`).

use serde::{Deserialize, Serialize};

use crate::consts::SPAWN_RATE_PER_SEC;
use crate::detection::ModelConfig;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw hand boxes and model labels
    pub debug: bool,
    /// Hand model parameters
    pub model: ModelConfig,
    /// Expected bug spawns per second
    pub spawn_rate_per_sec: f64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Buzz when a bug appears
    pub spawn_sound: bool,
    /// Buzz when a bug escapes
    pub escape_sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            model: ModelConfig::default(),
            spawn_rate_per_sec: SPAWN_RATE_PER_SEC,

            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.3,
            spawn_sound: false,
            escape_sound: false,
        }
    }
}

impl Settings {
    /// Apply recognised query parameters (`?debug=true&sounds=all`)
    pub fn from_query(search: &str) -> Self {
        let mut settings = Self::default();
        let query = search.trim_start_matches('?');
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "debug" => settings.debug = value == "true",
                "sounds" if value == "all" => {
                    settings.spawn_sound = true;
                    settings.escape_sound = true;
                }
                "muted" if value == "true" => settings.master_volume = 0.0,
                _ => {}
            }
        }
        settings
    }

    /// Effective sound effect volume
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Effective music volume
    pub fn effective_music_volume(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Load settings from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let settings = Self::from_query(&search);
        log::info!("Debug mode: {}", settings.debug);
        settings
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
    fn test_debug_flag() {
        assert!(Settings::from_query("?debug=true").debug);
        assert!(Settings::from_query("?foo=1&debug=true").debug);
        assert!(!Settings::from_query("?debug=1").debug);
        assert!(!Settings::from_query("").debug);
        assert!(!Settings::from_query("?debug").debug);
    }

    #[test]
    fn test_sound_flags() {
        let settings = Settings::from_query("?sounds=all");
        assert!(settings.spawn_sound && settings.escape_sound);

        let muted = Settings::from_query("?muted=true");
        assert_eq!(muted.effective_sfx_volume(), 0.0);
        assert_eq!(muted.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.debug);
        assert_eq!(settings.effective_music_volume(), 0.3);
        assert_eq!(settings.model, ModelConfig::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"debug": true}"#).unwrap();
        assert!(settings.debug);
        assert_eq!(settings.spawn_rate_per_sec, SPAWN_RATE_PER_SEC);
    }
}
