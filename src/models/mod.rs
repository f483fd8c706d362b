pub mod config;
pub mod deck;
pub mod deck_set;
pub mod quality;
pub mod record_set;
pub mod schedule_record;
pub mod sm2;
pub mod snapshot;

pub use config::Sm2Config;
pub use deck::Deck;
pub use deck_set::{DeckSet, DeckStats};
pub use quality::Quality;
pub use record_set::{RecordSet, ReviewEvent};
pub use schedule_record::{CardId, DeckId, ScheduleRecord};
pub use sm2::{ReviewOutcome, Scheduler};
pub use snapshot::{CardBucket, SchedulerSnapshot, SchedulerStats};
