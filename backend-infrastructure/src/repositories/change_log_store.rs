use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};

use backend_domain::{
    ChangeLogEntry, ChangeLogFilter, ChangeLogRepository, ChangeLogWindow, NewChangeLogEntry,
    PageWindow,
};

use super::SqliteStore;

const CHANGE_LOG_COLUMNS: &str = "id, timestamp, player_name, player_uuid, class_name, entry_id, \
     entry_name, position, change_type, old_data, new_data, source_file_path, source_line, \
     dimension_context";

pub async fn insert_change_log(
    conn: &mut SqliteConnection,
    entry: &NewChangeLogEntry,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO mtr_logs (
            timestamp, player_name, player_uuid, class_name, entry_id, entry_name, position,
            change_type, old_data, new_data, source_file_path, source_line, dimension_context
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&entry.timestamp)
    .bind(&entry.player_name)
    .bind(&entry.player_uuid)
    .bind(&entry.class_name)
    .bind(&entry.entry_id)
    .bind(&entry.entry_name)
    .bind(&entry.position)
    .bind(&entry.change_type)
    .bind(&entry.old_data)
    .bind(&entry.new_data)
    .bind(&entry.source_file_path)
    .bind(entry.source_line)
    .bind(&entry.dimension_context)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

fn push_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, filter: &'a ChangeLogFilter) {
    builder.push(" WHERE 1 = 1");
    if let Some(uuid) = &filter.player_uuid {
        builder.push(" AND player_uuid = ").push_bind(uuid.as_str());
    }
    if let Some(context) = &filter.dimension_context {
        builder.push(" AND dimension_context = ").push_bind(context.as_str());
    }
    if let Some(entry_id) = &filter.entry_id {
        builder.push(" AND entry_id = ").push_bind(entry_id.as_str());
    }
    if let Some(change_type) = &filter.change_type {
        builder.push(" AND change_type = ").push_bind(change_type.as_str());
    }
    match &filter.window {
        ChangeLogWindow::Any => {}
        // Timestamps are stored with an ISO date prefix.
        ChangeLogWindow::SingleDate(date) => {
            builder
                .push(" AND timestamp LIKE ")
                .push_bind(format!("{}%", date));
        }
        ChangeLogWindow::Range { start, end } => {
            if let Some(start) = start {
                builder.push(" AND timestamp >= ").push_bind(start.as_str());
            }
            if let Some(end) = end {
                builder.push(" AND timestamp <= ").push_bind(end.as_str());
            }
        }
    }
}

fn entry_from_row(row: SqliteRow) -> ChangeLogEntry {
    ChangeLogEntry {
        id: row.get("id"),
        timestamp: row.get("timestamp"),
        player_name: row.get("player_name"),
        player_uuid: row.get("player_uuid"),
        class_name: row.get("class_name"),
        entry_id: row.get("entry_id"),
        entry_name: row.get("entry_name"),
        position: row.get("position"),
        change_type: row.get("change_type"),
        old_data: row.get("old_data"),
        new_data: row.get("new_data"),
        source_file_path: row.get("source_file_path"),
        source_line: row.get("source_line"),
        dimension_context: row.get("dimension_context"),
    }
}

#[async_trait]
impl ChangeLogRepository for SqliteStore {
    async fn count_change_logs(&self, filter: &ChangeLogFilter) -> anyhow::Result<i64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM mtr_logs");
        push_filter(&mut builder, filter);
        Ok(builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await?)
    }

    async fn fetch_change_logs(
        &self,
        filter: &ChangeLogFilter,
        window: PageWindow,
    ) -> anyhow::Result<Vec<ChangeLogEntry>> {
        let mut builder = QueryBuilder::new("SELECT ");
        builder.push(CHANGE_LOG_COLUMNS).push(" FROM mtr_logs");
        push_filter(&mut builder, filter);
        // Both parts come from closed enums.
        builder
            .push(" ORDER BY ")
            .push(filter.order_column.as_sql())
            .push(" ")
            .push(filter.direction.as_sql())
            .push(" LIMIT ")
            .push_bind(window.limit)
            .push(" OFFSET ")
            .push_bind(window.offset);
        let rows = builder.build().fetch_all(self.pool()).await?;
        Ok(rows.into_iter().map(entry_from_row).collect())
    }

    async fn find_change_log(&self, id: i64) -> anyhow::Result<Option<ChangeLogEntry>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM mtr_logs WHERE id = ?",
            CHANGE_LOG_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(entry_from_row))
    }
}
