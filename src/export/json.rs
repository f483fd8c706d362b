//! JSON import/export module.
//! Reads the deck listing produced by the package import and review logs,
//! and writes scheduling records out.

use crate::error::Result;
use crate::models::{DeckSet, RecordSet, ReviewEvent};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Imports a deck listing (`{ "decks": [{ "id", "name", "cardIds" }] }`).
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_deck_set(path: impl AsRef<Path>) -> Result<DeckSet> {
    let file = File::open(path.as_ref())?;
    let decks: DeckSet = serde_json::from_reader(BufReader::new(file))?;

    let stats = decks.stats();
    log::info!(
        "Imported {} decks ({} cards) from '{}'",
        stats.total_decks,
        stats.total_cards,
        path.as_ref().display()
    );
    Ok(decks)
}

/// Imports a review log: a JSON array of review events.
pub fn import_review_log(path: impl AsRef<Path>) -> Result<Vec<ReviewEvent>> {
    let file = File::open(path.as_ref())?;
    let events: Vec<ReviewEvent> = serde_json::from_reader(BufReader::new(file))?;
    log::info!(
        "Loaded {} review events from '{}'",
        events.len(),
        path.as_ref().display()
    );
    Ok(events)
}

/// Writes every record of `records` as a pretty-printed JSON array.
///
/// The export is write-only: there is no matching import, since records are
/// only ever created from a deck listing and changed by reviews. Reproduce a
/// record set by replaying its review log over the same listing instead.
pub fn export_records_to_path(records: &RecordSet, path: impl AsRef<Path>) -> Result<()> {
    let all: Vec<_> = records.records().collect();
    let json_string = serde_json::to_string_pretty(&all)?;
    let mut file = File::create(path.as_ref())?;
    file.write_all(json_string.as_bytes())?;
    log::info!(
        "Exported {} records to '{}'",
        all.len(),
        path.as_ref().display()
    );
    Ok(())
}
