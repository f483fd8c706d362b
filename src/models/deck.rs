//! Deck listing handed over by the package import: an id, a name and the ids of its cards.
//! Card content (front/back, media) is never seen by the scheduler.
use super::{CardId, DeckId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub card_ids: Vec<CardId>,
}

impl Deck {
    pub fn new(id: impl Into<String>, name: impl Into<String>, card_ids: Vec<CardId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            card_ids,
        }
    }
}
