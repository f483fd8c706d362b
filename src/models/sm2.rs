//! Review scheduling for imported cards.
//!
//! A rating of 3 or more counts as recalled. The first two successes give fixed
//! intervals of 1 and 6 days; after that the old interval is multiplied by the
//! ease factor the card had going into the review. Anything below 3 sends the
//! card back to a 1 day interval with its success streak cleared.
//!
//! The ease factor moves after every review, failures included, and is held at
//! the configured minimum (never under 1.3). Every call takes `now` explicitly.

use super::{Quality, ScheduleRecord, Sm2Config};
use crate::error::Result;
use chrono::{DateTime, Days, Utc};

/// Result of reviewing a card once.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewOutcome {
    pub updated_record: ScheduleRecord,
    pub next_review_at: DateTime<Utc>,
}

/// The scheduling engine. Holds only its parameters; record state is owned by the caller.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    config: Sm2Config,
}

impl Scheduler {
    /// Fails with `InvalidConfig` when `config` could break the ease floor
    /// or hand out zero-day intervals.
    pub fn new(config: Sm2Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Sm2Config {
        &self.config
    }

    /// Fresh record for a card that has never been reviewed.
    pub fn create_record(&self, card_id: impl Into<String>, deck_id: impl Into<String>) -> ScheduleRecord {
        ScheduleRecord {
            card_id: card_id.into(),
            deck_id: deck_id.into(),
            ease_factor: self.config.initial_ease_factor,
            interval: 0,
            repetitions: 0,
            next_review_at: None,
            last_reviewed_at: None,
            last_quality: None,
        }
    }

    /// Computes the record that replaces `record` after a review at `now`.
    pub fn apply_review(
        &self,
        record: &ScheduleRecord,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> ReviewOutcome {
        let q = quality.value();

        let (interval, repetitions) = if q >= self.config.passing_quality {
            match record.repetitions {
                0 => (self.config.first_interval, 1),
                1 => (self.config.second_interval, 2),
                reps => (
                    mature_interval(record.interval, record.ease_factor),
                    reps.saturating_add(1),
                ),
            }
        } else {
            (self.config.failing_interval, 0)
        };

        let mut ease_factor = next_ease_factor(record.ease_factor, q as i64);
        if ease_factor < self.config.minimum_ease_factor {
            ease_factor = self.config.minimum_ease_factor;
        }

        // Calendar-day addition; saturates instead of overflowing for absurd intervals
        let next_review_at = now
            .checked_add_days(Days::new(interval as u64))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        log::debug!(
            "card {} rated {}: interval {} -> {} days, EF {:.2} -> {:.2}",
            record.card_id,
            q,
            record.interval,
            interval,
            record.ease_factor,
            ease_factor
        );

        ReviewOutcome {
            updated_record: ScheduleRecord {
                ease_factor,
                interval,
                repetitions,
                next_review_at: Some(next_review_at),
                last_reviewed_at: Some(now),
                last_quality: Some(quality),
                ..record.clone()
            },
            next_review_at,
        }
    }
}

/// Unclamped SM-2 ease update: EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)).
///
/// Defined for any integer `quality`, including values outside 0-5.
pub fn next_ease_factor(ease_factor: f64, quality: i64) -> f64 {
    let d = 5.0 - quality as f64;
    ease_factor + (0.1 - d * (0.08 + d * 0.02))
}

// f64::round rounds half away from zero
fn mature_interval(interval: u32, ease_factor: f64) -> u32 {
    (interval as f64 * ease_factor).round() as u32
}
