//! User settings and preferences
//!
//! Persisted as one JSON document in a [`KeyValueStore`], or read from a
//! plain settings file by the binary.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, StorageError};
use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background music while a quiz question is shown
    pub quiz_music_enabled: bool,
    /// Gameplay balance overrides
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quiz_music_enabled: true,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "physics_lab_settings";

    /// Load settings, falling back to defaults on missing or corrupt data
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        match store.get_json::<Self>(Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings.sanitized()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load a settings JSON document from disk, falling back to defaults
    /// when the file is missing or unreadable
    pub fn load_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Using default settings, cannot read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&raw) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Using default settings, {} is invalid: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace unusable tuning with the defaults
    fn sanitized(mut self) -> Self {
        if let Err(e) = self.tuning.validate() {
            log::warn!("Using default tuning: {}", e);
            self.tuning = Tuning::default();
        }
        self
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<(), StorageError> {
        store.set_json(Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::platform::MemoryStore;
    use crate::sim::{GamePhase, GameState, TickInput, tick};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "physics_lab_settings_{}_{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_corrupt_settings_use_defaults() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.quiz_music_enabled = false;
        settings.tuning.starting_lives = 5;
        settings.save(&mut store).unwrap();

        let loaded = Settings::load(&store);
        assert!(!loaded.quiz_music_enabled);
        assert_eq!(loaded.tuning.starting_lives, 5);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(Settings::STORAGE_KEY, r#"{"tuning":{"player_speed":9.0}}"#)
            .unwrap();
        let loaded = Settings::load(&store);
        assert!(loaded.quiz_music_enabled);
        assert_eq!(loaded.tuning.player_speed, 9.0);
        assert_eq!(loaded.tuning.bullet_speed, 8.0);
    }

    #[test]
    fn test_load_plain_settings_file() {
        let path = temp_path("plain");
        fs::write(
            &path,
            r#"{"quiz_music_enabled": false, "tuning": {"player_speed": 9.0}}"#,
        )
        .unwrap();

        let loaded = Settings::load_file(&path);
        fs::remove_file(&path).ok();

        assert!(!loaded.quiz_music_enabled);
        assert_eq!(loaded.tuning.player_speed, 9.0);
        assert_eq!(loaded.tuning.bullet_speed, 8.0);
    }

    #[test]
    fn test_load_file_falls_back() {
        assert_eq!(
            Settings::load_file(temp_path("does_not_exist")),
            Settings::default()
        );

        let path = temp_path("broken");
        fs::write(&path, "{\"tuning\": [").unwrap();
        let loaded = Settings::load_file(&path);
        fs::remove_file(&path).ok();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_invalid_tuning_falls_back_to_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(
                Settings::STORAGE_KEY,
                r#"{"quiz_music_enabled":false,"tuning":{"max_frame_multiplier":-1.0}}"#,
            )
            .unwrap();
        let loaded = Settings::load(&store);
        assert!(!loaded.quiz_music_enabled);
        assert_eq!(loaded.tuning, Tuning::default());

        // The loaded tuning drives a tick without trouble
        let mut state = GameState::with_tuning(1, loaded.tuning);
        state.phase = GamePhase::Running;
        tick(&mut state, &TickInput::default(), 16.67);
        assert_eq!(state.phase, GamePhase::Running);
    }
}
