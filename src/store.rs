use crate::models::Trail;
use anyhow::Result;
use fjall::Keyspace;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use tokio::task;

/// Store key for the raw recommendation blob
pub const KEY_RECOMMENDATIONS: &str = "trails:recommendations";

/// Store key for the run summary text
pub const KEY_SUMMARY: &str = "trails:summary";

/// Store key for an error the upstream service recorded before the run
pub const KEY_ERROR: &str = "trails:error";

/// Store key for the parsed, enriched trail sequence
pub const KEY_PARSED: &str = "trails:parsed";

/// Persistent key/value store shared with the surrounding application
pub struct TripStore {
    store: Keyspace,
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

impl TripStore {
    /// Open (or create) the store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let items = db.keyspace("trailscout", fjall::KeyspaceCreateOptions::default)?;
        Ok(TripStore { store: items })
    }

    /// Stores a serializable value under a key.
    #[tracing::instrument(name = "put_store", level = "debug", skip(self))]
    pub async fn put<T: Serialize + Send + Debug + 'static>(&self, key: &str, value: T) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let bytes = postcard::to_stdvec(&value)?;

        let _ = task::spawn_blocking(move || store.insert(key, bytes)).await?;
        Ok(())
    }

    /// Retrieves a value if present. Returns `None` for missing keys.
    #[tracing::instrument(name = "query_store", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || get_from_store(store, key_bytes)).await??;

        match maybe_bytes {
            Some(bytes) => {
                tracing::debug!("Key found");
                Ok(Some(postcard::from_bytes(&bytes)?))
            }
            None => {
                tracing::debug!("Key not found");
                Ok(None)
            }
        }
    }

    /// Removes a key from the store.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        let _ = task::spawn_blocking(move || store.remove(key)).await?;
        Ok(())
    }

    /// The raw recommendation blob, as the upstream service wrote it
    pub async fn recommendations(&self) -> Result<Option<String>> {
        self.get(KEY_RECOMMENDATIONS).await
    }

    /// Replace the stored recommendation blob
    pub async fn set_recommendations(&self, blob: &str) -> Result<()> {
        self.put(KEY_RECOMMENDATIONS, blob.to_string()).await
    }

    /// Summary text stored alongside the recommendations
    pub async fn summary(&self) -> Result<Option<String>> {
        self.get(KEY_SUMMARY).await
    }

    /// Replace the stored summary text
    pub async fn set_summary(&self, summary: &str) -> Result<()> {
        self.put(KEY_SUMMARY, summary.to_string()).await
    }

    /// Error string the upstream service recorded, if any
    pub async fn upstream_error(&self) -> Result<Option<String>> {
        self.get(KEY_ERROR).await
    }

    /// Record an upstream error string
    pub async fn set_upstream_error(&self, message: &str) -> Result<()> {
        self.put(KEY_ERROR, message.to_string()).await
    }

    /// The parsed trail sequence from the last successful run
    pub async fn parsed_trails(&self) -> Result<Option<Vec<Trail>>> {
        self.get(KEY_PARSED).await
    }

    /// Persist the parsed trail sequence
    pub async fn set_parsed_trails(&self, trails: &[Trail]) -> Result<()> {
        self.put(KEY_PARSED, trails.to_vec()).await
    }
}
