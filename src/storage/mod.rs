//! Key-value persistence behind the lifecycle services.
//!
//! Every service receives an `Arc<dyn KeyValueStore>` instead of reaching
//! for a global. Values are JSON documents stored under a handful of
//! well-known keys.

pub mod file;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;

use crate::config::{Config, StorageBackend};
use crate::error::Result;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Registration profile object.
pub const USER_KEY: &str = "user";
/// Array of support requests.
pub const REQUESTS_KEY: &str = "userRequests";
/// Array of submitted ratings.
pub const RATINGS_KEY: &str = "ratings";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the document stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<JsonValue>>;

    /// Replaces the document stored under `key`.
    async fn set(&self, key: &str, value: JsonValue) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// Reads a JSON array stored under `key`. A missing key is an empty list.
pub async fn load_list<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Vec<T>> {
    match store.get(key).await? {
        Some(JsonValue::Null) | None => Ok(Vec::new()),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

pub async fn save_list<T: Serialize>(store: &dyn KeyValueStore, key: &str, items: &[T]) -> Result<()> {
    let value = serde_json::to_value(items)?;
    store.set(key, value).await
}

pub async fn load_object<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(JsonValue::Null) | None => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

pub async fn save_object<T: Serialize>(store: &dyn KeyValueStore, key: &str, item: &T) -> Result<()> {
    let value = serde_json::to_value(item)?;
    store.set(key, value).await
}

/// Builds the store selected by `STORAGE_BACKEND`.
pub async fn open_store(config: &Config) -> Result<SharedStore> {
    let store: SharedStore = match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; state is lost on restart");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::File => {
            tracing::info!(dir = %config.storage_dir.display(), "Using file storage");
            Arc::new(JsonFileStore::open(&config.storage_dir).await?)
        }
        StorageBackend::Postgres => {
            let pool = postgres::create_pool(config).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Using postgres storage");
            Arc::new(PgStore::new(pool))
        }
    };
    Ok(store)
}
