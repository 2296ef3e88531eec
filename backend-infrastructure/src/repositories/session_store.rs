use async_trait::async_trait;
use sqlx::{QueryBuilder, Row, Sqlite};

use backend_domain::{NewPlayerSession, PageWindow, PlayerSession, SessionFilter, SessionRepository};

use super::SqliteStore;

fn push_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, filter: &'a SessionFilter) {
    builder.push(" WHERE 1 = 1");
    if let Some(uuid) = &filter.player_uuid {
        builder.push(" AND player_uuid = ").push_bind(uuid.as_str());
    }
    if let Some(event_type) = filter.event_type {
        builder.push(" AND event_type = ").push_bind(event_type.as_str());
    }
    if let Some(start_at) = filter.window.start_at() {
        builder.push(" AND occurred_at >= ").push_bind(start_at);
    }
    if let Some(end_at) = filter.window.end_at() {
        builder.push(" AND occurred_at <= ").push_bind(end_at);
    }
}

#[async_trait]
impl SessionRepository for SqliteStore {
    async fn insert_session(&self, session: &NewPlayerSession) -> anyhow::Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO player_sessions (
                event_type, occurred_at, player_uuid, player_name, player_ip,
                world_name, dimension_key, x, y, z
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(session.event_type.as_str())
        .bind(session.occurred_at)
        .bind(&session.player_uuid)
        .bind(&session.player_name)
        .bind(&session.player_ip)
        .bind(&session.world_name)
        .bind(&session.dimension_key)
        .bind(session.x)
        .bind(session.y)
        .bind(session.z)
        .execute(self.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn count_sessions(&self, filter: &SessionFilter) -> anyhow::Result<i64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM player_sessions");
        push_filter(&mut builder, filter);
        Ok(builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await?)
    }

    async fn fetch_sessions(
        &self,
        filter: &SessionFilter,
        window: PageWindow,
    ) -> anyhow::Result<Vec<PlayerSession>> {
        let mut builder = QueryBuilder::new(
            "SELECT id, event_type, occurred_at, player_uuid, player_name, player_ip, \
             world_name, dimension_key, x, y, z FROM player_sessions",
        );
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY id DESC LIMIT ")
            .push_bind(window.limit)
            .push(" OFFSET ")
            .push_bind(window.offset);
        let rows = builder.build().fetch_all(self.pool()).await?;
        Ok(rows
            .into_iter()
            .map(|row| PlayerSession {
                id: row.get("id"),
                event_type: row.get("event_type"),
                occurred_at: row.get("occurred_at"),
                player_uuid: row.get("player_uuid"),
                player_name: row.get("player_name"),
                player_ip: row.get("player_ip"),
                world_name: row.get("world_name"),
                dimension_key: row.get("dimension_key"),
                x: row.get("x"),
                y: row.get("y"),
                z: row.get("z"),
            })
            .collect())
    }
}
