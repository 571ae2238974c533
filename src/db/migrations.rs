use std::collections::HashSet;
use std::path::{Path, PathBuf};

use deadpool_postgres::Pool;

use super::error::DbError;

/// `.sql` files in `dir` not yet recorded in `applied`, in file name order.
pub fn pending(dir: &Path, applied: &HashSet<String>) -> Result<Vec<(String, PathBuf)>, DbError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files: Vec<(String, PathBuf)> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "sql"))
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().to_string();
            Some((name, path))
        })
        .filter(|(name, _)| !applied.contains(name))
        .collect();

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Apply every pending migration in `dir`, each in its own transaction.
pub async fn run(pool: &Pool, dir: &Path) -> Result<(), DbError> {
    let client = pool.get().await?;

    client
        .execute(
            "CREATE TABLE IF NOT EXISTS _migrations (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )",
            &[],
        )
        .await?;

    let rows = client.query("SELECT name FROM _migrations", &[]).await?;
    let applied: HashSet<String> = rows.iter().map(|row| row.get(0)).collect();

    if !dir.exists() {
        tracing::info!("No migrations directory at {}, skipping", dir.display());
        return Ok(());
    }

    for (name, path) in pending(dir, &applied)? {
        let sql = std::fs::read_to_string(&path)?;

        let mut client = pool.get().await?;
        let tx = client.transaction().await?;

        tx.batch_execute(&sql).await.map_err(|e| {
            DbError::MigrationError(format!("Failed to run migration {}: {}", name, e))
        })?;
        tx.execute("INSERT INTO _migrations (name) VALUES ($1)", &[&name])
            .await?;
        tx.commit().await?;

        tracing::info!("Applied migration: {}", name);
    }

    tracing::info!("All migrations up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_orders_and_filters() {
        let dir = std::env::temp_dir().join(format!("actus-migrations-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        for name in ["002_b.sql", "001_a.sql", "003_c.sql", "notes.txt"] {
            std::fs::write(dir.join(name), "SELECT 1;").unwrap();
        }

        let applied: HashSet<String> = ["002_b.sql".to_string()].into_iter().collect();
        let names: Vec<String> = pending(&dir, &applied)
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["001_a.sql", "003_c.sql"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_dir_has_nothing_pending() {
        let dir = Path::new("/definitely/not/a/migrations/dir");
        assert!(pending(dir, &HashSet::new()).unwrap().is_empty());
    }
}
