//! Application configuration and persisted state.
//!
//! Two concerns live here:
//!
//! - [`PreviewConfig`]: tunables for the preview pipeline (debounce
//!   interval, log-panel policy);
//! - [`AppState`]: what survives a restart — the active exercise, every
//!   exercise's edited source, and UI preferences.
//!
//! State is stored as pretty-printed JSON in the platform data directory
//! under [`APP_ID`]. Loading is forgiving: a missing or corrupt file logs
//! a warning and falls back to defaults rather than failing startup.

use crate::error::{KataError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application identifier used for the data directory
pub const APP_ID: &str = "dev.uikata.uikata";

/// File name of the persisted state inside the data directory
pub const APP_STATE_FILE: &str = "app_state.json";

/// The platform-appropriate data directory for this application
pub fn app_data_dir() -> Result<PathBuf> {
    dirs_next::data_dir()
        .map(|dir| dir.join(APP_ID))
        .ok_or_else(|| KataError::Config("could not determine the user data directory".to_string()))
}

fn default_debounce_ms() -> u64 {
    500
}

/// Tunables for the preview pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Quiet interval before an edit triggers a run, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Show the log panel even when a run produced a renderable export.
    /// Individual exercises may force this on regardless.
    #[serde(default)]
    pub always_show_log_panel: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            always_show_log_panel: false,
        }
    }
}

impl PreviewConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// UI preferences that persist across sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiPreferences {
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
}

fn default_dark_mode() -> bool {
    true
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: default_dark_mode(),
        }
    }
}

/// Everything the application persists between sessions
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppState {
    /// Schema version for forward migrations
    #[serde(default)]
    pub version: u32,
    /// Identifier of the exercise that was open
    #[serde(default)]
    pub active_exercise: Option<String>,
    /// Per-exercise edited sources, keyed by exercise id
    #[serde(default)]
    pub edited_sources: BTreeMap<String, String>,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub ui: UiPreferences,
}

impl AppState {
    /// Load state from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| KataError::Serialization(e.to_string()))
    }

    /// Load from the default location, falling back to defaults.
    ///
    /// A first run (no file yet) is not worth a warning; anything else is.
    pub fn load_or_default() -> Self {
        let path = match app_data_dir() {
            Ok(dir) => dir.join(APP_STATE_FILE),
            Err(e) => {
                tracing::warn!("cannot locate app state: {e}");
                return Self::default();
            }
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("failed to load app state from {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save state to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| KataError::Serialization(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Save to the default location
    pub fn save(&self) -> Result<()> {
        let path = app_data_dir()?.join(APP_STATE_FILE);
        self.save_to(&path)
    }

    /// The stored edit for an exercise, if the user has one
    pub fn source_for(&self, exercise_id: &str) -> Option<&str> {
        self.edited_sources.get(exercise_id).map(String::as_str)
    }

    /// Remember the user's edit for an exercise
    pub fn remember_source(&mut self, exercise_id: &str, source: &str) {
        self.edited_sources
            .insert(exercise_id.to_string(), source.to_string());
    }
}
