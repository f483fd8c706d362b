//! Due/new/learning classification and aggregate statistics.
use super::{CardId, ScheduleRecord, Scheduler};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// Bucket a card falls into at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CardBucket {
    Due,
    New,
    Learning,
}

/// Card ids per bucket. Recomputed on every query, never cached.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerSnapshot {
    pub due_card_ids: BTreeSet<CardId>,
    pub new_card_ids: BTreeSet<CardId>,
    pub learning_card_ids: BTreeSet<CardId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerStats {
    pub total_cards: usize,
    pub due_count: usize,
    pub new_count: usize,
    pub learning_count: usize,
    pub average_ease_factor: f64,
}

impl Scheduler {
    /// Returns the bucket of `record` at `now`, or `None` for a reviewed card
    /// that is not due and has reached the graduation interval.
    pub fn classify(&self, record: &ScheduleRecord, now: DateTime<Utc>) -> Option<CardBucket> {
        match record.next_review_at {
            Some(next) if next <= now => Some(CardBucket::Due),
            Some(_) if record.interval < self.config().graduation_interval => {
                Some(CardBucket::Learning)
            }
            Some(_) => None,
            None if record.last_reviewed_at.is_none() => Some(CardBucket::New),
            None => None,
        }
    }

    pub fn compute_snapshot<'a>(
        &self,
        records: impl IntoIterator<Item = &'a ScheduleRecord>,
        now: DateTime<Utc>,
    ) -> SchedulerSnapshot {
        let mut snapshot = SchedulerSnapshot::default();
        for record in records {
            let bucket = match self.classify(record, now) {
                Some(CardBucket::Due) => &mut snapshot.due_card_ids,
                Some(CardBucket::New) => &mut snapshot.new_card_ids,
                Some(CardBucket::Learning) => &mut snapshot.learning_card_ids,
                None => continue,
            };
            bucket.insert(record.card_id.clone());
        }
        snapshot
    }

    /// Bucket counts plus the mean ease factor (0 when there are no records).
    pub fn compute_stats<'a>(
        &self,
        records: impl IntoIterator<Item = &'a ScheduleRecord>,
        now: DateTime<Utc>,
    ) -> SchedulerStats {
        let mut stats = SchedulerStats::default();
        let mut ease_sum = 0.0;

        for record in records {
            stats.total_cards += 1;
            ease_sum += record.ease_factor;
            match self.classify(record, now) {
                Some(CardBucket::Due) => stats.due_count += 1,
                Some(CardBucket::New) => stats.new_count += 1,
                Some(CardBucket::Learning) => stats.learning_count += 1,
                None => {}
            }
        }

        if stats.total_cards > 0 {
            stats.average_ease_factor = ease_sum / stats.total_cards as f64;
        }
        stats
    }
}
