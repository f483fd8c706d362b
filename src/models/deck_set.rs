//! Container for all decks of one import
use super::Deck;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckSet {
    pub decks: Vec<Deck>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub total_decks: usize,
    pub total_cards: usize,
}

impl DeckSet {
    pub fn new(decks: Vec<Deck>) -> Self {
        Self { decks }
    }

    pub fn deck(&self, deck_id: &str) -> Option<&Deck> {
        self.decks.iter().find(|deck| deck.id == deck_id)
    }

    pub fn stats(&self) -> DeckStats {
        DeckStats {
            total_decks: self.decks.len(),
            total_cards: self.decks.iter().map(|deck| deck.card_ids.len()).sum(),
        }
    }

    /// Every `(card id, deck id)` pair, in listing order.
    pub fn card_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.decks.iter().flat_map(|deck| {
            deck.card_ids
                .iter()
                .map(move |card_id| (card_id.as_str(), deck.id.as_str()))
        })
    }
}
