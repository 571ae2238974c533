//! Postgres-backed entity store.
//!
//! All entity types share one `entities` table (see
//! `migrations/001_entities.sql`), scoped by chain id.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::{EntityStore, StoreError};
use crate::db::{DbOperation, DbPool, DbValue};

const ENTITIES_TABLE: &str = "entities";

pub struct PgEntityStore {
    pool: Arc<DbPool>,
    chain_id: i64,
}

impl PgEntityStore {
    pub fn new(pool: Arc<DbPool>, chain_id: u64) -> Result<Self, StoreError> {
        let chain_id = to_db_chain_id(chain_id)?;
        Ok(Self { pool, chain_id })
    }
}

fn to_db_chain_id(chain_id: u64) -> Result<i64, StoreError> {
    i64::try_from(chain_id).map_err(|_| StoreError::ChainIdOutOfRange(chain_id))
}

#[async_trait]
impl EntityStore for PgEntityStore {
    async fn load_value(
        &self,
        entity_type: &str,
        id: &str,
    ) -> Result<Option<JsonValue>, StoreError> {
        let rows = self
            .pool
            .query(
                "SELECT data FROM entities WHERE chain_id = $1 AND entity_type = $2 AND id = $3",
                &[&self.chain_id, &entity_type, &id],
            )
            .await?;
        Ok(rows.first().map(|row| row.get::<_, JsonValue>(0)))
    }

    async fn save_value(
        &self,
        entity_type: &str,
        id: &str,
        value: JsonValue,
    ) -> Result<(), StoreError> {
        let op = DbOperation::Upsert {
            table: ENTITIES_TABLE.to_string(),
            columns: vec![
                "chain_id".to_string(),
                "entity_type".to_string(),
                "id".to_string(),
                "data".to_string(),
            ],
            values: vec![
                DbValue::Int64(self.chain_id),
                DbValue::Text(entity_type.to_string()),
                DbValue::Text(id.to_string()),
                DbValue::Json(value),
            ],
            conflict_columns: vec![
                "chain_id".to_string(),
                "entity_type".to_string(),
                "id".to_string(),
            ],
            update_columns: vec!["data".to_string()],
            touch_columns: vec!["updated_at".to_string()],
        };
        self.pool.execute_transaction(vec![op]).await?;
        Ok(())
    }
}
