use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use backend_domain::{IdentityRepository, IdentityUpdate, PageWindow, PlayerIdentity};

use super::SqliteStore;

const UPSERT_IDENTITY: &str = r#"
    INSERT INTO player_identities (player_uuid, player_name, first_played, last_played, last_updated)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT(player_uuid) DO UPDATE SET
        player_name = excluded.player_name,
        first_played = COALESCE(excluded.first_played, player_identities.first_played),
        last_played = COALESCE(excluded.last_played, player_identities.last_played),
        last_updated = excluded.last_updated
"#;

/// Absent timestamps keep the stored ones.
pub async fn upsert_identity_on(
    conn: &mut SqliteConnection,
    update: &IdentityUpdate,
) -> anyhow::Result<()> {
    sqlx::query(UPSERT_IDENTITY)
        .bind(&update.player_uuid)
        .bind(&update.player_name)
        .bind(update.first_played)
        .bind(update.last_played)
        .bind(update.observed_at)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

fn identity_from_row(row: SqliteRow) -> PlayerIdentity {
    PlayerIdentity {
        player_uuid: row.get("player_uuid"),
        player_name: row.get("player_name"),
        first_played: row.get("first_played"),
        last_played: row.get("last_played"),
        last_updated: row.get("last_updated"),
    }
}

#[async_trait]
impl IdentityRepository for SqliteStore {
    async fn find_identity_by_uuid(
        &self,
        player_uuid: &str,
    ) -> anyhow::Result<Option<PlayerIdentity>> {
        let row = sqlx::query(
            "SELECT player_uuid, player_name, first_played, last_played, last_updated \
             FROM player_identities WHERE player_uuid = ?",
        )
        .bind(player_uuid)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(identity_from_row))
    }

    async fn find_identity_by_name(
        &self,
        player_name: &str,
    ) -> anyhow::Result<Option<PlayerIdentity>> {
        let row = sqlx::query(
            "SELECT player_uuid, player_name, first_played, last_played, last_updated \
             FROM player_identities WHERE player_name = ? ORDER BY last_updated DESC LIMIT 1",
        )
        .bind(player_name)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(identity_from_row))
    }

    async fn count_identities(&self) -> anyhow::Result<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM player_identities")
            .fetch_one(self.pool())
            .await?)
    }

    async fn fetch_identities(&self, window: PageWindow) -> anyhow::Result<Vec<PlayerIdentity>> {
        let rows = sqlx::query(
            "SELECT player_uuid, player_name, first_played, last_played, last_updated \
             FROM player_identities ORDER BY last_updated DESC LIMIT ? OFFSET ?",
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(identity_from_row).collect())
    }

    async fn upsert_identity(&self, update: &IdentityUpdate) -> anyhow::Result<()> {
        let mut conn = self.pool().acquire().await?;
        upsert_identity_on(&mut conn, update).await
    }
}
