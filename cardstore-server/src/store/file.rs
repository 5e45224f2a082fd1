use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use cardstore_model::{card::Card, request::card::CardFields};

use tokio::{fs, sync::RwLock};

use super::{CardStore, Cards, StoreError};

/// A store mirrored to a JSON file.
///
/// The file is read once on [`FileStore::open`] and rewritten in full after
/// every mutation. The write lock is held until the file is written, so
/// writes never interleave. If writing fails the error is returned, but the
/// in-memory change stays.
#[derive(Debug)]
pub struct FileStore {
    cards: RwLock<Cards>,
    path: PathBuf,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// A missing or malformed file is not an error; the store just starts
    /// out empty.
    pub async fn open(path: impl Into<PathBuf>) -> FileStore {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let cards = match FileStore::load(&path).await {
            Ok(cards) => {
                tracing::info!(path = %path.display(), count = cards.len(), "loaded cards");
                cards
            }
            Err(StoreError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no data file, starting empty");
                Cards::default()
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to load cards, starting empty");
                Cards::default()
            }
        };

        FileStore {
            cards: RwLock::new(cards),
            path,
        }
    }

    /// Reads the cards stored at `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Cards, StoreError> {
        let bytes = fs::read(path).await?;
        serde_json::from_slice(&bytes).map_err(From::from)
    }

    async fn persist(&self, cards: &Cards) -> Result<(), StoreError> {
        let data = serde_json::to_vec(cards)?;
        fs::write(&self.path, data).await?;
        Ok(())
    }
}

#[async_trait]
impl CardStore for FileStore {
    async fn list(&self) -> Vec<Card> {
        self.cards.read().await.to_vec()
    }

    async fn get(&self, id: &str) -> Option<Card> {
        self.cards.read().await.find(id).cloned()
    }

    async fn create(&self, fields: CardFields) -> Result<Card, StoreError> {
        let mut cards = self.cards.write().await;
        let card = cards.insert(fields);
        self.persist(&cards).await?;
        Ok(card)
    }

    async fn update(&self, id: &str, fields: CardFields) -> Result<Option<Card>, StoreError> {
        let mut cards = self.cards.write().await;
        let Some(card) = cards.update(id, fields).cloned() else {
            return Ok(None);
        };
        self.persist(&cards).await?;
        Ok(Some(card))
    }

    async fn delete(&self, id: &str) -> Result<usize, StoreError> {
        let mut cards = self.cards.write().await;
        let removed = cards.remove(id);
        if removed > 0 {
            self.persist(&cards).await?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use cardstore_model::card::Price;
    use uuid::Uuid;

    use super::*;

    fn temp_path() -> PathBuf {
        env::temp_dir().join(format!("cardstore_{}.json", Uuid::new_v4()))
    }

    fn listing() -> CardFields {
        CardFields {
            nomi: Some("Samsung A54".into()),
            narx: Some(Price::from(3_900_000)),
            xotira: Some("128GB".into()),
            aloqa: Some("t.me/seller".into()),
            holati: Some("yangi".into()),
            rasmi: Some("https://img.example/a54.webp".into()),
        }
    }

    #[tokio::test]
    async fn mutations_round_trip_through_the_file() -> Result<(), StoreError> {
        let path = temp_path();
        let store = FileStore::open(&path).await;
        assert!(store.list().await.is_empty());

        let first = store.create(listing()).await?;
        let second = store.create(listing()).await?;
        assert_eq!(FileStore::load(&path).await?.to_vec(), store.list().await);

        store
            .update(
                &first.id,
                CardFields {
                    holati: Some("ishlatilgan".into()),
                    ..Default::default()
                },
            )
            .await?;
        assert_eq!(FileStore::load(&path).await?.to_vec(), store.list().await);

        store.delete(&second.id).await?;
        let reloaded = FileStore::open(&path).await;
        assert_eq!(reloaded.list().await, store.list().await);
        assert_eq!(reloaded.list().await.len(), 1);

        let _ = fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn file_shape_has_cards_key() -> Result<(), StoreError> {
        let path = temp_path();
        let store = FileStore::open(&path).await;
        let card = store.create(listing()).await?;

        let raw: serde_json::Value = serde_json::from_slice(&fs::read(&path).await?)?;
        assert_eq!(raw["cards"][0]["id"], card.id.as_str());
        assert_eq!(raw["cards"][0]["narx"], 3_900_000);

        let _ = fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn malformed_file_opens_empty() {
        let path = temp_path();
        fs::write(&path, b"{ not json").await.unwrap();

        let store = FileStore::open(&path).await;
        assert!(store.list().await.is_empty());
        assert!(matches!(
            FileStore::load(&path).await,
            Err(StoreError::Json(_))
        ));

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_delete_does_not_touch_the_file() {
        let path = temp_path();
        let store = FileStore::open(&path).await;

        assert_eq!(store.delete("missing").await.unwrap(), 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn failed_persist_keeps_memory_change() {
        // a regular file where the data directory should be
        let dir = temp_path();
        fs::write(&dir, b"").await.unwrap();

        let store = FileStore::open(dir.join("db.json")).await;
        let result = store.create(listing()).await;

        assert!(matches!(result, Err(StoreError::Io(_))));
        assert_eq!(store.list().await.len(), 1);

        let _ = fs::remove_file(&dir).await;
    }
}
