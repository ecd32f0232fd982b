use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, ensure};
use serde::Deserialize;

use crate::error::Error;
use crate::scan::ScanOptions;

/// Accepted range for the per-image delay, in whole seconds.
pub const DELAY_SECS_RANGE: std::ops::RangeInclusive<u64> = 1..=60;

const DEFAULT_DELAY: Duration = Duration::from_secs(5);

/// Playback parameters handed to the scheduler. Fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Minimum time between two successful renders.
    pub delay: Duration,
    /// Shuffle the queue once before the first lap.
    pub shuffle: bool,
}

impl PlaybackConfig {
    /// Build from a delay in whole seconds.
    ///
    /// # Errors
    /// Fails if `delay_secs` is outside [`DELAY_SECS_RANGE`].
    pub fn from_secs(delay_secs: u64, shuffle: bool) -> Result<Self> {
        ensure!(
            DELAY_SECS_RANGE.contains(&delay_secs),
            "delay must be between {} and {} seconds, got {delay_secs}",
            DELAY_SECS_RANGE.start(),
            DELAY_SECS_RANGE.end()
        );
        Ok(Self {
            delay: Duration::from_secs(delay_secs),
            shuffle,
        })
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            shuffle: true,
        }
    }
}

/// Optional YAML configuration file; every key has a default and command-line
/// flags take precedence.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Root directory to scan recursively for images.
    pub photo_library_path: Option<PathBuf>,
    /// Time each image stays on screen (`5s`, `1m`, ...).
    #[serde(with = "humantime_serde")]
    pub delay: Duration,
    /// Shuffle once at startup.
    pub shuffle: bool,
    /// Optional deterministic seed for the startup shuffle.
    pub shuffle_seed: Option<u64>,
    /// Borderless fullscreen window; `false` opens a regular window.
    pub fullscreen: bool,
    /// Directory walk options.
    pub scan: ScanOptions,
}

impl Configuration {
    /// Read and parse a YAML configuration file.
    ///
    /// # Errors
    /// [`Error::Io`] if the file cannot be read, [`Error::Config`] if it is
    /// not valid configuration YAML.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.delay.subsec_nanos() == 0,
            "delay must be a whole number of seconds"
        );
        PlaybackConfig::from_secs(self.delay.as_secs(), self.shuffle)?;
        Ok(self)
    }

    #[must_use]
    pub const fn playback(&self) -> PlaybackConfig {
        PlaybackConfig {
            delay: self.delay,
            shuffle: self.shuffle,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let playback = PlaybackConfig::default();
        Self {
            photo_library_path: None,
            delay: playback.delay,
            shuffle: playback.shuffle,
            shuffle_seed: None,
            fullscreen: true,
            scan: ScanOptions::default(),
        }
    }
}
