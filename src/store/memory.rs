//! In-memory entity store, used by tests and `--dry-run`.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::{EntityStore, StoreError};

type Key = (String, String);

#[derive(Debug, Default)]
pub struct MemoryEntityStore {
    entities: RwLock<HashMap<Key, JsonValue>>,
}

fn poison_err<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Poisoned
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all entity types.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.entities.read().map_err(poison_err)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Ordered copy of every record, keyed by `(entity_type, id)`.
    pub fn snapshot(&self) -> Result<BTreeMap<Key, JsonValue>, StoreError> {
        let entities = self.entities.read().map_err(poison_err)?;
        Ok(entities
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

#[async_trait]
impl EntityStore for MemoryEntityStore {
    async fn load_value(
        &self,
        entity_type: &str,
        id: &str,
    ) -> Result<Option<JsonValue>, StoreError> {
        let entities = self.entities.read().map_err(poison_err)?;
        Ok(entities
            .get(&(entity_type.to_string(), id.to_string()))
            .cloned())
    }

    async fn save_value(
        &self,
        entity_type: &str,
        id: &str,
        value: JsonValue,
    ) -> Result<(), StoreError> {
        let mut entities = self.entities.write().map_err(poison_err)?;
        entities.insert((entity_type.to_string(), id.to_string()), value);
        Ok(())
    }
}
