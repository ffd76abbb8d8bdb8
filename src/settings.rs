//! Analyzer settings persistence.
//!
//! Settings are read from `settings.json` in the platform config directory, or
//! from an explicit path. Every field falls back to its default when missing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::parsers::DecodeOptions;

/// Seconds after `APP.STARTUP` excluded from scoring
pub const DEFAULT_WARMUP_SECS: u32 = 30;
/// Minimum spacing between two kept records of one category
pub const DEFAULT_DEDUP_SECS: u32 = 5;

/// Errors from loading or saving settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// What to do with a line that has too few tokens
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Stop the session at the first malformed line
    #[default]
    Abort,
    /// Log the line and carry on with the next one
    Skip,
}

/// Reproduce-or-fix switches for known quirks of the transmitter's reporting
/// tooling. `Default` is the corrected behavior; [`Compatibility::reference`]
/// reproduces the historical numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Compatibility {
    /// Third Encoder container re-reads the second one (audio pair dropped)
    pub encoder_audio_from_video_container: bool,
    /// Frame-size window start is not advanced when the frame size changes
    pub freeze_frame_window_start: bool,
    /// After shutdown, the open frame-size window is added again on every record
    pub repeat_tail_accumulation: bool,
    /// Frame-size changes per second uses truncating integer division
    pub truncate_change_rate: bool,
}

impl Compatibility {
    /// Every quirk reproduced
    pub fn reference() -> Self {
        Self {
            encoder_audio_from_video_container: true,
            freeze_frame_window_start: true,
            repeat_tail_accumulation: true,
            truncate_change_rate: true,
        }
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            encoder_audio_from_video_container: self.encoder_audio_from_video_container,
        }
    }
}

/// Settings for one analysis run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_warmup_secs")]
    pub warmup_secs: u32,
    #[serde(default = "default_dedup_secs")]
    pub dedup_secs: u32,
    #[serde(default)]
    pub on_malformed: MalformedLinePolicy,
    #[serde(default)]
    pub compatibility: Compatibility,
}

fn default_version() -> u32 {
    1
}

fn default_warmup_secs() -> u32 {
    DEFAULT_WARMUP_SECS
}

fn default_dedup_secs() -> u32 {
    DEFAULT_DEDUP_SECS
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            version: 1,
            warmup_secs: DEFAULT_WARMUP_SECS,
            dedup_secs: DEFAULT_DEDUP_SECS,
            on_malformed: MalformedLinePolicy::default(),
            compatibility: Compatibility::default(),
        }
    }
}

impl AnalyzerSettings {
    /// Get the config directory path for streamhealth
    pub fn get_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("streamhealth"))
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the config directory, falling back to defaults
    pub fn load() -> Self {
        let path = match Self::get_settings_path() {
            Some(p) => p,
            None => return Self::default(),
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings to the config directory
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::get_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
