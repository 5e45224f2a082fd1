//! Card record stores.
//!
//! The HTTP layer only ever talks to a [`CardStore`]. [`FileStore`] is the
//! one the server runs with; [`MemoryStore`] keeps nothing on disk.

mod cards;
mod file;

pub use cards::Cards;
pub use file::FileStore;

use std::io;

use async_trait::async_trait;

use cardstore_model::{card::Card, request::card::CardFields};

use derive_more::{Display, Error, From};

use tokio::sync::RwLock;

/// The operations the card routes need from a store.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Lists every card in insertion order.
    async fn list(&self) -> Vec<Card>;

    /// Gets a card by its id.
    async fn get(&self, id: &str) -> Option<Card>;

    /// Creates a card with a fresh id and appends it.
    async fn create(&self, fields: CardFields) -> Result<Card, StoreError>;

    /// Merges the truthy fields into the card with `id`.
    ///
    /// Returns `Ok(None)` if no such card exists.
    async fn update(&self, id: &str, fields: CardFields) -> Result<Option<Card>, StoreError>;

    /// Removes every card with `id`, returning how many were removed.
    async fn delete(&self, id: &str) -> Result<usize, StoreError>;
}

/// A store failure.
#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    /// The data file could not be read or written.
    #[display("data file i/o failed: {_0}")]
    Io(io::Error),
    /// The data file could not be parsed or the cards could not be encoded.
    #[display("data file is malformed: {_0}")]
    Json(serde_json::Error),
}

/// A store that lives only in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cards: RwLock<Cards>,
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn list(&self) -> Vec<Card> {
        self.cards.read().await.to_vec()
    }

    async fn get(&self, id: &str) -> Option<Card> {
        self.cards.read().await.find(id).cloned()
    }

    async fn create(&self, fields: CardFields) -> Result<Card, StoreError> {
        Ok(self.cards.write().await.insert(fields))
    }

    async fn update(&self, id: &str, fields: CardFields) -> Result<Option<Card>, StoreError> {
        Ok(self.cards.write().await.update(id, fields).cloned())
    }

    async fn delete(&self, id: &str) -> Result<usize, StoreError> {
        Ok(self.cards.write().await.remove(id))
    }
}
