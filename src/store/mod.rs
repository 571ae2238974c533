//! Entity persistence.
//!
//! Handlers read and write whole entity records through [`EntityStore`]. The
//! store itself is untyped (JSON payloads addressed by entity type and id);
//! the [`load`], [`save`] and [`load_or_create`] helpers add the typed layer.

mod memory;
mod postgres;

pub use memory::MemoryEntityStore;
pub use postgres::PgEntityStore;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::db::DbError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Failed to (de)serialize {entity_type} '{id}': {source}")]
    Serialization {
        entity_type: String,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Entity store lock poisoned")]
    Poisoned,

    #[error("Chain id {0} is out of range for the entities table")]
    ChainIdOutOfRange(u64),
}

/// A persisted record with a stable string id.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const ENTITY_TYPE: &'static str;

    fn id(&self) -> &str;

    /// Zero-valued record with the given id.
    fn new(id: String) -> Self;
}

#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn load_value(&self, entity_type: &str, id: &str)
        -> Result<Option<JsonValue>, StoreError>;

    /// Insert or fully replace a record.
    async fn save_value(&self, entity_type: &str, id: &str, value: JsonValue)
        -> Result<(), StoreError>;
}

pub async fn load<E: Entity>(store: &dyn EntityStore, id: &str) -> Result<Option<E>, StoreError> {
    let Some(value) = store.load_value(E::ENTITY_TYPE, id).await? else {
        return Ok(None);
    };
    serde_json::from_value(value)
        .map(Some)
        .map_err(|source| StoreError::Serialization {
            entity_type: E::ENTITY_TYPE.to_string(),
            id: id.to_string(),
            source,
        })
}

pub async fn save<E: Entity>(store: &dyn EntityStore, entity: &E) -> Result<(), StoreError> {
    let value = serde_json::to_value(entity).map_err(|source| StoreError::Serialization {
        entity_type: E::ENTITY_TYPE.to_string(),
        id: entity.id().to_string(),
        source,
    })?;
    store.save_value(E::ENTITY_TYPE, entity.id(), value).await
}

/// Loads a record, or a fresh zero-valued one if none exists.
///
/// The flag is `true` when the record was created. Nothing is written until
/// the caller saves.
pub async fn load_or_create<E: Entity>(
    store: &dyn EntityStore,
    id: &str,
) -> Result<(E, bool), StoreError> {
    match load::<E>(store, id).await? {
        Some(entity) => Ok((entity, false)),
        None => Ok((E::new(id.to_string()), true)),
    }
}
