//! Recall quality rating given after each review.
//!
//! - 0: Complete blackout
//! - 1: Incorrect, but the answer was recognised
//! - 2: Incorrect, but the answer seemed easy once shown
//! - 3: Correct with serious difficulty
//! - 4: Correct after hesitation
//! - 5: Perfect response

use crate::error::SchedulerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rating in 0..=5. Out-of-range values are rejected on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, SchedulerError> {
        if (0..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(SchedulerError::QualityOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Quality {
    type Error = SchedulerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u8> for Quality {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as i64)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_full_range() {
        for value in 0..=5 {
            assert_eq!(Quality::new(value).unwrap().value() as i64, value);
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            Quality::new(6),
            Err(SchedulerError::QualityOutOfRange(6))
        ));
        assert!(matches!(
            Quality::new(-1),
            Err(SchedulerError::QualityOutOfRange(-1))
        ));
        assert!(Quality::try_from(200u8).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let quality: Quality = serde_json::from_str("4").unwrap();
        assert_eq!(quality.value(), 4);
        assert!(serde_json::from_str::<Quality>("9").is_err());
        assert_eq!(serde_json::to_string(&quality).unwrap(), "4");
    }
}
