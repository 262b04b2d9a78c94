//! Run settings
//!
//! Persisted as JSON next to the binary. Every field has a default, so a
//! settings file only needs the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::BallParams;

/// How the demo scene is populated and how long it runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// Number of balls scattered over the ground plane
    pub ball_count: u32,
    /// Seed for ball placement
    pub seed: u64,
    /// Ticks to simulate before giving up on everything coming to rest
    pub ticks: u32,
    /// Half-width of the square the balls are scattered over (m)
    pub spread: f64,
    /// Drop height range for ball centres (m)
    pub min_height: f64,
    pub max_height: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            ball_count: 3,
            seed: 2016,
            ticks: 600,
            spread: 5.0,
            min_height: 2.0,
            max_height: 8.0,
        }
    }
}

/// Top-level settings file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ball physics
    pub physics: BallParams,
    /// Scene population and run length
    pub run: RunOptions,
    /// Log every phase sub-step at trace level
    pub trace_phases: bool,
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.physics.validate()?;
        let run = &self.run;
        if !(run.min_height.is_finite() && run.max_height.is_finite()) {
            return Err(Error::InvalidSetting {
                field: "run.min_height",
                reason: "height range must be finite",
            });
        }
        if run.min_height < self.physics.radius {
            return Err(Error::InvalidSetting {
                field: "run.min_height",
                reason: "balls must start at or above the contact height",
            });
        }
        if run.max_height < run.min_height {
            return Err(Error::InvalidSetting {
                field: "run.max_height",
                reason: "must not be below run.min_height",
            });
        }
        if !(run.spread.is_finite() && run.spread >= 0.0) {
            return Err(Error::InvalidSetting {
                field: "run.spread",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(path.as_ref()) {
            Ok(settings) => Ok(settings),
            Err(e) if e.is_recoverable() => {
                log::warn!("{} not found, using default settings", path.as_ref().display());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
