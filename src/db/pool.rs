use std::path::Path;

use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::types::ToSql;
use tokio_postgres::NoTls;

use super::error::DbError;
use super::types::DbOperation;

pub struct DbPool {
    pool: Pool,
}

impl DbPool {
    pub async fn new(database_url: &str) -> Result<Self, DbError> {
        let config = database_url
            .parse::<tokio_postgres::Config>()
            .map_err(|e| DbError::InvalidConnectionString(e.to_string()))?;

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = Manager::from_config(config, NoTls, manager_config);

        let pool = Pool::builder(manager)
            .max_size(16)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(DbError::BuildError)?;

        let _conn = pool.get().await?;
        tracing::info!("Database connection pool created successfully");

        Ok(Self { pool })
    }

    pub async fn execute_transaction(&self, operations: Vec<DbOperation>) -> Result<(), DbError> {
        if operations.is_empty() {
            return Ok(());
        }

        let mut client = self.pool.get().await?;
        let transaction = client.transaction().await?;

        for op in operations {
            let (sql, params) = match op {
                DbOperation::Upsert {
                    table,
                    columns,
                    values,
                    conflict_columns,
                    update_columns,
                    touch_columns,
                } => (
                    build_upsert_sql(
                        &table,
                        &columns,
                        values.len(),
                        &conflict_columns,
                        &update_columns,
                        &touch_columns,
                    ),
                    values,
                ),
            };

            let params_refs: Vec<&(dyn ToSql + Sync)> =
                params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();

            if let Err(e) = transaction.execute(&sql, &params_refs[..]).await {
                let db_err: DbError = e.into();
                tracing::error!("SQL execution failed\n  SQL: {}\n  Error: {}", sql, db_err);
                return Err(db_err);
            }
        }

        transaction.commit().await?;
        Ok(())
    }

    pub async fn run_migrations(&self, dir: &Path) -> Result<(), DbError> {
        super::migrations::run(&self.pool, dir).await
    }

    pub async fn query(
        &self,
        query: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<tokio_postgres::Row>, DbError> {
        let client = self.pool.get().await?;
        let rows = client.query(query, params).await?;
        Ok(rows)
    }
}

/// Wrap a column name in double quotes to handle reserved keywords.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name)
}

fn quote_cols(columns: &[String]) -> String {
    columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", ")
}

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn build_upsert_sql(
    table: &str,
    columns: &[String],
    value_count: usize,
    conflict_columns: &[String],
    update_columns: &[String],
    touch_columns: &[String],
) -> String {
    let cols = quote_cols(columns);
    let placeholders_str = placeholders(value_count);
    let conflict_cols = quote_cols(conflict_columns);

    if update_columns.is_empty() && touch_columns.is_empty() {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO NOTHING",
            table, cols, placeholders_str, conflict_cols
        )
    } else {
        let updates_str = update_columns
            .iter()
            .map(|c| format!("{} = EXCLUDED.{}", quote_ident(c), quote_ident(c)))
            .chain(touch_columns.iter().map(|c| format!("{} = NOW()", quote_ident(c))))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {}",
            table, cols, placeholders_str, conflict_cols, updates_str
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbValue;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_upsert_sql_updates_listed_columns() {
        let sql = build_upsert_sql(
            "entities",
            &cols(&["chain_id", "entity_type", "id", "data"]),
            4,
            &cols(&["chain_id", "entity_type", "id"]),
            &cols(&["data"]),
            &cols(&["updated_at"]),
        );
        assert_eq!(
            sql,
            "INSERT INTO entities (\"chain_id\", \"entity_type\", \"id\", \"data\") \
             VALUES ($1, $2, $3, $4) ON CONFLICT (\"chain_id\", \"entity_type\", \"id\") \
             DO UPDATE SET \"data\" = EXCLUDED.\"data\", \"updated_at\" = NOW()"
        );
    }

    #[test]
    fn test_upsert_sql_without_updates_does_nothing() {
        let sql = build_upsert_sql("t", &cols(&["id"]), 1, &cols(&["id"]), &[], &[]);
        assert!(sql.ends_with("ON CONFLICT (\"id\") DO NOTHING"));
    }

    #[test]
    fn test_db_value_accepts_entity_columns() {
        assert!(<DbValue as ToSql>::accepts(&tokio_postgres::types::Type::INT8));
        assert!(<DbValue as ToSql>::accepts(&tokio_postgres::types::Type::TEXT));
        assert!(<DbValue as ToSql>::accepts(&tokio_postgres::types::Type::JSONB));
    }
}
