//! The scheduling records of one import, owned by the host application.
//!
//! `RecordSet` is a plain value with a single writer: every review reads the
//! record currently stored for its card and replaces it, so reviews of
//! different cards submitted back to back all land.

use super::{
    CardBucket, CardId, DeckSet, Quality, ReviewOutcome, ScheduleRecord, Scheduler,
    SchedulerSnapshot, SchedulerStats,
};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of a review log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEvent {
    pub card_id: CardId,
    /// Raw rating, validated when the event is applied
    pub quality: i64,
    pub reviewed_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default)]
pub struct RecordSet {
    scheduler: Scheduler,
    records: BTreeMap<CardId, ScheduleRecord>,
}

impl RecordSet {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            records: BTreeMap::new(),
        }
    }

    pub fn from_decks(scheduler: Scheduler, decks: &DeckSet) -> Self {
        let mut set = Self::new(scheduler);
        set.initialize(decks);
        set
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Drops all records and creates a fresh one per card in `decks`.
    /// A card listed in several decks ends up in the last one.
    pub fn initialize(&mut self, decks: &DeckSet) {
        self.records.clear();
        for (card_id, deck_id) in decks.card_pairs() {
            let fresh = self.scheduler.create_record(card_id, deck_id);
            if let Some(previous) = self.records.insert(card_id.to_string(), fresh) {
                log::warn!(
                    "card {} listed again in deck {}, replacing deck {}",
                    card_id,
                    deck_id,
                    previous.deck_id()
                );
            }
        }
        log::info!(
            "Initialized {} scheduling records from {} decks",
            self.records.len(),
            decks.decks.len()
        );
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, card_id: &str) -> Option<&ScheduleRecord> {
        self.records.get(card_id)
    }

    /// Records in card id order
    pub fn records(&self) -> impl Iterator<Item = &ScheduleRecord> {
        self.records.values()
    }

    /// Reviews a card. Unknown ids are ignored and return `None`,
    /// no record is created for them.
    pub fn review(
        &mut self,
        card_id: &str,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Option<ReviewOutcome> {
        let Some(current) = self.records.get_mut(card_id) else {
            log::warn!("review for unknown card {card_id} ignored");
            return None;
        };
        let outcome = self.scheduler.apply_review(current, quality, now);
        *current = outcome.updated_record.clone();
        Some(outcome)
    }

    /// Applies a review log in order and returns how many events hit a known card.
    ///
    /// Every quality is checked first: a log with any rating outside 0-5 is
    /// rejected and leaves the set untouched.
    pub fn replay<'a>(&mut self, events: impl IntoIterator<Item = &'a ReviewEvent>) -> Result<usize> {
        let checked = events
            .into_iter()
            .map(|event| Ok((event, Quality::new(event.quality)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut applied = 0;
        for (event, quality) in checked {
            if self.review(&event.card_id, quality, event.reviewed_at).is_some() {
                applied += 1;
            }
        }
        log::info!("Replayed {applied} reviews");
        Ok(applied)
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> SchedulerSnapshot {
        self.scheduler.compute_snapshot(self.records.values(), now)
    }

    pub fn stats(&self, now: DateTime<Utc>) -> SchedulerStats {
        self.scheduler.compute_stats(self.records.values(), now)
    }

    /// Stats restricted to the cards of one deck
    pub fn deck_stats(&self, deck_id: &str, now: DateTime<Utc>) -> SchedulerStats {
        self.scheduler.compute_stats(
            self.records
                .values()
                .filter(|record| record.deck_id() == deck_id),
            now,
        )
    }

    /// Card to present next: the most overdue due card, otherwise the first new card.
    pub fn next_card(&self, now: DateTime<Utc>) -> Option<&ScheduleRecord> {
        let most_overdue = self
            .records
            .values()
            .filter(|record| self.scheduler.classify(record, now) == Some(CardBucket::Due))
            .min_by_key(|record| record.next_review_at());

        most_overdue.or_else(|| self.records.values().find(|record| record.is_new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchedulerError;
    use crate::models::Deck;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
    }

    fn q(value: i64) -> Quality {
        Quality::new(value).unwrap()
    }

    fn decks() -> DeckSet {
        DeckSet::new(vec![
            Deck::new("d1", "Verbs", vec!["c1".into(), "c2".into()]),
            Deck::new("d2", "Nouns", vec!["c3".into(), "c1".into()]),
        ])
    }

    #[test]
    fn test_initialize_creates_fresh_records() {
        let set = RecordSet::from_decks(Scheduler::default(), &decks());

        assert_eq!(set.len(), 3);
        assert!(set.records().all(|record| record.is_new()));
        assert_eq!(set.get("c2").unwrap().deck_id(), "d1");
        assert_eq!(set.get("c3").unwrap().deck_id(), "d2");
        assert!(set.get("nope").is_none());
    }

    #[test]
    fn test_initialize_last_deck_wins_for_shared_card() {
        let set = RecordSet::from_decks(Scheduler::default(), &decks());
        assert_eq!(set.get("c1").unwrap().deck_id(), "d2");

        let shared = DeckSet::new(vec![
            Deck::new("d1", "First", vec!["c1".into()]),
            Deck::new("d2", "Second", vec!["c1".into()]),
        ]);
        let set = RecordSet::from_decks(Scheduler::default(), &shared);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("c1").unwrap().deck_id(), "d2");
        assert_eq!(set.deck_stats("d1", t0()).total_cards, 0);
    }

    #[test]
    fn test_initialize_discards_previous_records() {
        let mut set = RecordSet::from_decks(Scheduler::default(), &decks());
        set.review("c1", q(5), t0());

        set.initialize(&DeckSet::new(vec![Deck::new("d9", "Other", vec!["x".into()])]));

        assert_eq!(set.len(), 1);
        assert!(set.get("c1").is_none());
        assert!(set.get("x").unwrap().is_new());
    }

    #[test]
    fn test_review_unknown_card_is_noop() {
        let mut set = RecordSet::from_decks(Scheduler::default(), &decks());
        let before: Vec<_> = set.records().cloned().collect();

        assert!(set.review("ghost", q(5), t0()).is_none());

        assert_eq!(set.len(), 3);
        assert!(set.get("ghost").is_none());
        assert_eq!(set.records().cloned().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_review_after_clear_is_noop() {
        let mut set = RecordSet::from_decks(Scheduler::default(), &decks());
        set.clear();
        assert!(set.is_empty());
        assert!(set.review("c1", q(4), t0()).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_back_to_back_reviews_are_not_lost() {
        let mut set = RecordSet::from_decks(Scheduler::default(), &decks());

        set.review("c1", q(5), t0());
        set.review("c2", q(4), t0());
        set.review("c1", q(5), t0() + Duration::days(1));

        let c1 = set.get("c1").unwrap();
        assert_eq!(c1.repetitions(), 2);
        assert_eq!(c1.interval(), 6);
        assert_eq!(set.get("c2").unwrap().repetitions(), 1);
        assert!(set.get("c3").unwrap().is_new());
    }

    #[test]
    fn test_snapshot_and_stats_follow_reviews() {
        let mut set = RecordSet::from_decks(Scheduler::default(), &decks());
        set.review("c1", q(5), t0());
        set.review("c2", q(1), t0());

        let snapshot = set.snapshot(t0() + Duration::hours(1));
        assert!(snapshot.learning_card_ids.contains("c1"));
        assert!(snapshot.learning_card_ids.contains("c2"));
        assert!(snapshot.new_card_ids.contains("c3"));
        assert!(snapshot.due_card_ids.is_empty());

        let stats = set.stats(t0() + Duration::days(2));
        assert_eq!(stats.total_cards, 3);
        assert_eq!(stats.due_count, 2);
        assert_eq!(stats.new_count, 1);

        let deck_stats = set.deck_stats("d1", t0());
        assert_eq!(deck_stats.total_cards, 1);
        assert_eq!(deck_stats.learning_count, 1);

        let deck_stats = set.deck_stats("d2", t0());
        assert_eq!(deck_stats.total_cards, 2);
        assert_eq!(deck_stats.new_count, 1);
        assert_eq!(deck_stats.learning_count, 1);
        assert_eq!(set.deck_stats("none", t0()).average_ease_factor, 0.0);
    }

    #[test]
    fn test_next_card_prefers_most_overdue() {
        let mut set = RecordSet::from_decks(Scheduler::default(), &decks());
        assert_eq!(set.next_card(t0()).map(|r| r.card_id()), Some("c1"));

        set.review("c2", q(4), t0());
        set.review("c3", q(4), t0() - Duration::days(3));

        let later = t0() + Duration::days(2);
        assert_eq!(set.next_card(later).map(|r| r.card_id()), Some("c3"));

        set.review("c3", q(4), later);
        assert_eq!(set.next_card(later).map(|r| r.card_id()), Some("c2"));
    }

    #[test]
    fn test_next_card_none_when_all_scheduled_ahead() {
        let mut set = RecordSet::from_decks(Scheduler::default(), &decks());
        for id in ["c1", "c2", "c3"] {
            set.review(id, q(5), t0());
        }
        assert!(set.next_card(t0()).is_none());
        assert!(RecordSet::default().next_card(t0()).is_none());
    }

    #[test]
    fn test_replay() {
        let mut set = RecordSet::from_decks(Scheduler::default(), &decks());
        let events = vec![
            ReviewEvent {
                card_id: "c1".into(),
                quality: 5,
                reviewed_at: t0(),
            },
            ReviewEvent {
                card_id: "ghost".into(),
                quality: 5,
                reviewed_at: t0(),
            },
            ReviewEvent {
                card_id: "c1".into(),
                quality: 4,
                reviewed_at: t0() + Duration::days(1),
            },
        ];

        assert_eq!(set.replay(&events).unwrap(), 2);
        assert_eq!(set.get("c1").unwrap().interval(), 6);
    }

    #[test]
    fn test_replay_rejects_bad_quality() {
        let mut set = RecordSet::from_decks(Scheduler::default(), &decks());
        let events = vec![
            ReviewEvent {
                card_id: "c2".into(),
                quality: 3,
                reviewed_at: t0(),
            },
            ReviewEvent {
                card_id: "c1".into(),
                quality: 7,
                reviewed_at: t0(),
            },
        ];

        let result = set.replay(&events);
        assert!(matches!(result, Err(SchedulerError::QualityOutOfRange(7))));
        // nothing applied, not even the valid event before the bad one
        assert!(set.records().all(|record| record.is_new()));
    }
}
