//! Scheduling state kept for every card of an imported deck.
use super::Quality;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub type CardId = String;
pub type DeckId = String;

/// SM-2 state of one card.
///
/// Fields are read-only outside the crate: a record only changes by being
/// replaced with the result of [`Scheduler::apply_review`](super::Scheduler::apply_review).
/// Serializes for export but deliberately has no `Deserialize`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub(crate) card_id: CardId,
    pub(crate) deck_id: DeckId,
    pub(crate) ease_factor: f64,
    pub(crate) interval: u32,
    pub(crate) repetitions: u32,
    pub(crate) next_review_at: Option<DateTime<Utc>>,
    pub(crate) last_reviewed_at: Option<DateTime<Utc>>,
    pub(crate) last_quality: Option<Quality>,
}

impl ScheduleRecord {
    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn deck_id(&self) -> &str {
        &self.deck_id
    }

    pub fn ease_factor(&self) -> f64 {
        self.ease_factor
    }

    /// Days until the next review, 0 before the first review
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Consecutive correct reviews
    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    pub fn next_review_at(&self) -> Option<DateTime<Utc>> {
        self.next_review_at
    }

    pub fn last_reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.last_reviewed_at
    }

    pub fn last_quality(&self) -> Option<Quality> {
        self.last_quality
    }

    /// True until the first review
    pub fn is_new(&self) -> bool {
        self.next_review_at.is_none() && self.last_reviewed_at.is_none()
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at.is_some_and(|next| next <= now)
    }
}
