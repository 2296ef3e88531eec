use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tracing::info;

use super::schema::{ADDED_COLUMNS, SCHEMA_STATEMENTS, SCHEMA_VERSION, UPSERT_SCHEMA_VERSION};
use crate::utils::current_millis;

const MAX_CONNECTIONS: u32 = 4;
const READ_ONLY_CONNECTIONS: u32 = 2;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite record store. Implements every repository port and hands its pool to the scanners.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    read_only_pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let url = format!("sqlite:{}?mode=rwc", path.display());
        let options = SqliteConnectOptions::from_str(&url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(BUSY_TIMEOUT);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open database {}", path.display()))?;

        let store = Self {
            read_only_pool: Self::read_only_pool(path)?,
            pool,
        };
        store.ensure_schema().await?;
        info!("record store ready at {}", path.display());
        Ok(store)
    }

    // Lazy so the first connection is made after the writer has created the file.
    fn read_only_pool(path: &Path) -> Result<SqlitePool> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
            .read_only(true)
            .busy_timeout(BUSY_TIMEOUT);
        Ok(SqlitePoolOptions::new()
            .max_connections(READ_ONLY_CONNECTIONS)
            .connect_lazy_with(options))
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        for (table, column, definition) in ADDED_COLUMNS {
            let present: Option<i64> = sqlx::query_scalar(
                "SELECT 1 FROM pragma_table_info(?) WHERE name = ?",
            )
            .bind(table)
            .bind(column)
            .fetch_optional(&mut *tx)
            .await?;
            if present.is_none() {
                sqlx::query(&format!(
                    "ALTER TABLE {} ADD COLUMN {} {}",
                    table, column, definition
                ))
                .execute(&mut *tx)
                .await?;
            }
        }
        sqlx::query(UPSERT_SCHEMA_VERSION)
            .bind(SCHEMA_VERSION)
            .bind(current_millis())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub(crate) fn read_only(&self) -> &SqlitePool {
        &self.read_only_pool
    }

    pub async fn close(&self) {
        self.read_only_pool.close().await;
        self.pool.close().await;
    }
}
