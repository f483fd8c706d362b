//! Tunable SM-2 parameters.
use super::Quality;
use crate::error::{Result, SchedulerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sm2Config {
    /// Ease factor of a card that was never reviewed
    pub initial_ease_factor: f64,
    /// Lower clamp applied after every ease factor update
    pub minimum_ease_factor: f64,
    /// Interval in days after the first successful review
    pub first_interval: u32,
    /// Interval in days after the second consecutive successful review
    pub second_interval: u32,
    /// Interval in days after a failed review
    pub failing_interval: u32,
    /// Cards below this interval are still learning
    pub graduation_interval: u32,
    /// Lowest quality that counts as a correct response
    pub passing_quality: u8,
}

impl Default for Sm2Config {
    fn default() -> Self {
        Self {
            initial_ease_factor: 2.5,
            minimum_ease_factor: 1.3,
            first_interval: 1,
            second_interval: 6,
            failing_interval: 1,
            graduation_interval: 4,
            passing_quality: 3,
        }
    }
}

/// Floor below which SM-2 ease factors are never allowed to go
pub const MIN_EASE_FLOOR: f64 = 1.3;

impl Sm2Config {
    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        log::info!("Loaded scheduler config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Rejects parameters that would let a review produce an ease factor
    /// below 1.3 or a zero-day interval.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| -> Result<()> { Err(SchedulerError::InvalidConfig(reason)) };

        if !(self.minimum_ease_factor >= MIN_EASE_FLOOR) {
            return invalid(format!(
                "minimumEaseFactor {} is below {MIN_EASE_FLOOR}",
                self.minimum_ease_factor
            ));
        }
        if !(self.initial_ease_factor >= self.minimum_ease_factor) {
            return invalid(format!(
                "initialEaseFactor {} is below minimumEaseFactor {}",
                self.initial_ease_factor, self.minimum_ease_factor
            ));
        }
        for (name, days) in [
            ("firstInterval", self.first_interval),
            ("secondInterval", self.second_interval),
            ("failingInterval", self.failing_interval),
        ] {
            if days == 0 {
                return invalid(format!("{name} must be at least 1 day"));
            }
        }
        if self.passing_quality > Quality::MAX {
            return invalid(format!(
                "passingQuality {} is above {}",
                self.passing_quality,
                Quality::MAX
            ));
        }
        Ok(())
    }
}
