//! Application configuration.
//!
//! Configuration is read once at startup from an optional JSON file and is
//! never written back. Every field has a default, so a partial file (or no
//! file at all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::DEFAULT_PARTICLE_COUNT;
use crate::audio::SoundType;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "POMODORO_CONFIG";

/// Allowed work duration in minutes.
pub const WORK_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=60;

/// Allowed break duration in minutes.
pub const BREAK_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=30;

/// Errors raised while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// User-adjustable timer and sound settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    /// Focus period length in minutes.
    pub work_minutes: u32,
    /// Rest period length in minutes.
    pub break_minutes: u32,
    /// Whether completion plays a notification.
    pub sound_enabled: bool,
    /// Notification volume in [0, 1].
    pub volume: f32,
    /// Which notification plays on completion.
    pub sound_type: SoundType,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
            sound_enabled: true,
            volume: 0.5,
            sound_type: SoundType::Classic,
        }
    }
}

impl TimerSettings {
    /// Clamps every field into its allowed range.
    pub fn sanitized(mut self) -> Self {
        self.work_minutes = self
            .work_minutes
            .clamp(*WORK_MINUTES_RANGE.start(), *WORK_MINUTES_RANGE.end());
        self.break_minutes = self
            .break_minutes
            .clamp(*BREAK_MINUTES_RANGE.start(), *BREAK_MINUTES_RANGE.end());
        self.volume = if self.volume.is_nan() {
            0.5
        } else {
            self.volume.clamp(0.0, 1.0)
        };
        self
    }

    pub fn work_seconds(&self) -> u32 {
        self.work_minutes * 60
    }

    pub fn break_seconds(&self) -> u32 {
        self.break_minutes * 60
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial window size in points.
    pub window_size: [f32; 2],
    /// Seed for the particle field; random when absent.
    pub seed: Option<u64>,
    /// Particles per field.
    pub particle_count: usize,
    pub timer: TimerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: [480.0, 720.0],
            seed: None,
            particle_count: DEFAULT_PARTICLE_COUNT,
            timer: TimerSettings::default(),
        }
    }
}

impl AppConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validated()
    }

    /// Loads a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads from the path in [`CONFIG_ENV_VAR`] or the first CLI argument,
    /// falling back to defaults when neither is given.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    fn config_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .or_else(|| std::env::args_os().nth(1).map(PathBuf::from))
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::Invalid(
                "particle_count must be greater than zero".to_string(),
            ));
        }
        let [w, h] = self.window_size;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "window_size must be positive, got {}x{}",
                w, h
            )));
        }
        self.timer = self.timer.sanitized();
        Ok(self)
    }
}
