use async_trait::async_trait;
use sqlx::{Row, SqliteConnection};

use backend_domain::{NbtCacheEntry, NbtCacheRepository};

use super::SqliteStore;

pub async fn upsert_nbt_cache_on(
    conn: &mut SqliteConnection,
    entry: &NbtCacheEntry,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO player_nbt_cache (player_uuid, raw_json, cached_at) VALUES (?, ?, ?)
        ON CONFLICT(player_uuid) DO UPDATE SET
            raw_json = excluded.raw_json,
            cached_at = excluded.cached_at
        "#,
    )
    .bind(&entry.player_uuid)
    .bind(&entry.raw_json)
    .bind(entry.cached_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[async_trait]
impl NbtCacheRepository for SqliteStore {
    async fn find_nbt_cache(&self, player_uuid: &str) -> anyhow::Result<Option<NbtCacheEntry>> {
        let row = sqlx::query(
            "SELECT player_uuid, raw_json, cached_at FROM player_nbt_cache WHERE player_uuid = ?",
        )
        .bind(player_uuid)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(|row| NbtCacheEntry {
            player_uuid: row.get("player_uuid"),
            raw_json: row.get("raw_json"),
            cached_at: row.get("cached_at"),
        }))
    }

    async fn upsert_nbt_cache(&self, entry: &NbtCacheEntry) -> anyhow::Result<()> {
        let mut conn = self.pool().acquire().await?;
        upsert_nbt_cache_on(&mut conn, entry).await
    }
}
