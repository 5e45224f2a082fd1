use std::collections::HashSet;

use cardstore_model::{card::Card, request::card::CardFields};

use derive_more::Deref;

use serde::{Deserialize, Serialize};

use uuid::Uuid;

/// An ordered collection of cards.
///
/// This is also the shape of the data file, `{"cards": [...]}`. Order is
/// insertion order; updates keep a card where it is.
#[derive(Clone, Debug, Default, Deref, Deserialize, Serialize, PartialEq)]
pub struct Cards {
    #[serde(default)]
    cards: Vec<Card>,
}

impl Cards {
    /// Creates a new collection from existing cards.
    pub fn new(cards: impl Into<Vec<Card>>) -> Cards {
        Cards {
            cards: cards.into(),
        }
    }

    /// Finds the first card with `id`.
    pub fn find(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Appends a new card with a fresh id, returning a copy of it.
    pub fn insert(&mut self, fields: CardFields) -> Card {
        let mut id = Uuid::new_v4().to_string();
        while self.find(&id).is_some() {
            id = Uuid::new_v4().to_string();
        }

        let card = Card::new(id, fields);
        self.cards.push(card.clone());
        card
    }

    /// Merges `fields` into the first card with `id`.
    pub fn update(&mut self, id: &str, fields: CardFields) -> Option<&Card> {
        let card = self.cards.iter_mut().find(|card| card.id == id)?;
        card.merge(fields);
        Some(card)
    }

    /// Removes every card with `id`, returning how many were removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.cards.len();
        self.cards.retain(|card| card.id != id);
        before - self.cards.len()
    }

    /// Ids that appear more than once, in order of their second appearance.
    ///
    /// Generated ids never collide, but a hand-edited data file can.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();

        for card in &self.cards {
            if !seen.insert(card.id.as_str()) && !duplicates.contains(&card.id.as_str()) {
                duplicates.push(card.id.as_str());
            }
        }

        duplicates
    }
}
