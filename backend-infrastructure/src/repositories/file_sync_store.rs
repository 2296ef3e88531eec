// File sync ledger
// Helpers run on the scanner's open transaction so gate checks and writes commit together

use anyhow::Result;
use sqlx::{Row, SqliteConnection};

use backend_domain::{ChangeLogFileState, FileSyncState, SourceKind, SyncStamp};

pub async fn find_sync_stamp(
    conn: &mut SqliteConnection,
    kind: SourceKind,
    file_path: &str,
) -> Result<Option<SyncStamp>> {
    let row = sqlx::query(
        "SELECT last_modified, last_processed FROM file_sync_state WHERE file_type = ? AND file_path = ?",
    )
    .bind(kind.as_str())
    .bind(file_path)
    .fetch_optional(&mut *conn)
    .await?;
    let Some(row) = row else {
        return Ok(None);
    };
    Ok(Some(SyncStamp {
        last_modified: row.try_get("last_modified")?,
        last_processed: row.try_get("last_processed")?,
    }))
}

pub async fn upsert_sync_state(conn: &mut SqliteConnection, state: &FileSyncState) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO file_sync_state (file_type, player_uuid, file_path, last_modified, last_processed)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(file_type, file_path) DO UPDATE SET
            player_uuid = excluded.player_uuid,
            last_modified = excluded.last_modified,
            last_processed = excluded.last_processed
        "#,
    )
    .bind(&state.file_type)
    .bind(&state.player_uuid)
    .bind(&state.file_path)
    .bind(state.last_modified)
    .bind(state.last_processed)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn find_change_log_file(
    conn: &mut SqliteConnection,
    file_path: &str,
) -> Result<Option<ChangeLogFileState>> {
    let row = sqlx::query(
        "SELECT file_path, last_modified, last_processed, dimension_context, rows_consumed, prefix_digest FROM mtr_files WHERE file_path = ?",
    )
    .bind(file_path)
    .fetch_optional(&mut *conn)
    .await?;
    let Some(row) = row else {
        return Ok(None);
    };
    Ok(Some(ChangeLogFileState {
        file_path: row.try_get("file_path")?,
        last_modified: row.try_get("last_modified")?,
        last_processed: row.try_get("last_processed")?,
        dimension_context: row.try_get("dimension_context")?,
        rows_consumed: row.try_get("rows_consumed")?,
        prefix_digest: row.try_get("prefix_digest")?,
    }))
}

pub async fn upsert_change_log_file(
    conn: &mut SqliteConnection,
    state: &ChangeLogFileState,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO mtr_files (file_path, last_modified, last_processed, dimension_context, rows_consumed, prefix_digest)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(file_path) DO UPDATE SET
            last_modified = excluded.last_modified,
            last_processed = excluded.last_processed,
            dimension_context = excluded.dimension_context,
            rows_consumed = excluded.rows_consumed,
            prefix_digest = excluded.prefix_digest
        "#,
    )
    .bind(&state.file_path)
    .bind(state.last_modified)
    .bind(state.last_processed)
    .bind(&state.dimension_context)
    .bind(state.rows_consumed)
    .bind(&state.prefix_digest)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// A context is warm once any of its files has been recorded.
pub async fn context_is_warm(conn: &mut SqliteConnection, dimension_context: &str) -> Result<bool> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM mtr_files WHERE dimension_context = ? LIMIT 1")
            .bind(dimension_context)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(found.is_some())
}
