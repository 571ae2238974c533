use bytes::BytesMut;
use serde_json::Value as JsonValue;
use tokio_postgres::types::{IsNull, ToSql, Type};

/// A value that can be bound as a statement parameter.
#[derive(Debug, Clone)]
pub enum DbValue {
    /// Signed 64-bit integer (BIGINT)
    Int64(i64),
    /// Text (unlimited length)
    Text(String),
    /// JSON payload (stored as JSONB)
    Json(JsonValue),
}

impl ToSql for DbValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            DbValue::Int64(v) => v.to_sql(ty, out),
            DbValue::Text(v) => v.to_sql(ty, out),
            DbValue::Json(v) => v.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        <i64 as ToSql>::accepts(ty)
            || <String as ToSql>::accepts(ty)
            || <JsonValue as ToSql>::accepts(ty)
    }

    tokio_postgres::types::to_sql_checked!();
}

/// Database write executed inside a transaction.
#[derive(Debug, Clone)]
pub enum DbOperation {
    /// INSERT with ON CONFLICT DO UPDATE (upsert)
    Upsert {
        table: String,
        columns: Vec<String>,
        values: Vec<DbValue>,
        /// Columns that form the unique constraint
        conflict_columns: Vec<String>,
        /// Columns to update on conflict
        update_columns: Vec<String>,
        /// Timestamp columns set to `NOW()` on conflict
        touch_columns: Vec<String>,
    },
}
