pub mod error;
pub mod export;
pub mod models;

pub use error::{Result, SchedulerError};
pub use models::{
    Deck, DeckSet, Quality, RecordSet, ReviewEvent, ScheduleRecord, Scheduler, SchedulerSnapshot,
    SchedulerStats, Sm2Config,
};
