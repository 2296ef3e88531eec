use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::{Acquire, Sqlite, SqliteConnection, Transaction};
use tokio::fs;
use tracing::{error, info};
use walkdir::WalkDir;

use backend_domain::{
    append_cursor, dimension_context, is_change_log_file, select_change_log_files,
    should_process, ChangeLogFileState, LogFileCandidate, NewChangeLogEntry, ScanReport, Scanner,
};

use super::world_files::WorldLayout;
use crate::repositories::{
    context_is_warm, find_change_log_file, insert_change_log, upsert_change_log_file, SqliteStore,
};
use crate::utils::{current_millis, modified_millis};

const COLUMN_TIMESTAMP: &str = "Timestamp";
const COLUMN_PLAYER_NAME: &str = "Player Name";
const COLUMN_PLAYER_UUID: &str = "Player UUID";
const COLUMN_CLASS: &str = "Class";
const COLUMN_ID: &str = "ID";
const COLUMN_NAME: &str = "Name";
const COLUMN_POSITION: &str = "Position";
const COLUMN_CHANGE: &str = "Change";
const COLUMN_OLD_DATA: &str = "Old Data";
const COLUMN_NEW_DATA: &str = "New Data";

/// Appends rail-network change-log CSV records, tracking how far each file was read.
pub struct ChangeLogScanner {
    store: SqliteStore,
    layout: WorldLayout,
}

impl ChangeLogScanner {
    pub fn new(store: SqliteStore, layout: WorldLayout) -> Self {
        Self { store, layout }
    }

    async fn sync_file(
        &self,
        tx: &mut Transaction<'static, Sqlite>,
        context: &str,
        candidate: &LogFileCandidate,
        report: &mut ScanReport,
    ) -> Result<()> {
        let file_key = candidate.path.to_string_lossy().to_string();
        let stored = find_change_log_file(tx, &file_key).await?;
        if !should_process(
            stored.as_ref().map(ChangeLogFileState::stamp),
            candidate.modified_millis,
        ) {
            report.files_skipped += 1;
            return Ok(());
        }
        let mut savepoint = tx.begin().await?;
        match append_file(&mut savepoint, context, candidate, &file_key, stored.as_ref()).await {
            Ok(rows) => {
                savepoint.commit().await?;
                report.files_processed += 1;
                report.rows_written += rows;
            }
            Err(err) => {
                savepoint.rollback().await?;
                report.files_failed += 1;
                error!(
                    "failed to ingest change log {}: {:#}",
                    candidate.path.display(),
                    err
                );
            }
        }
        Ok(())
    }
}

/// Walks every world for `logs/*.csv`, grouped by dimension context.
fn discover(worlds: &[PathBuf]) -> BTreeMap<String, Vec<LogFileCandidate>> {
    let mut groups: BTreeMap<String, Vec<LogFileCandidate>> = BTreeMap::new();
    for world in worlds {
        let files = WalkDir::new(world)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && is_change_log_file(entry.path()));
        for entry in files {
            let Some(context) = dimension_context(world, entry.path()) else {
                continue;
            };
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            groups.entry(context).or_default().push(LogFileCandidate {
                path: entry.into_path(),
                modified_millis: modified_millis(&metadata),
            });
        }
    }
    groups
}

fn column<'r>(headers: &csv::StringRecord, record: &'r csv::StringRecord, name: &str) -> &'r str {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .and_then(|index| record.get(index))
        .unwrap_or("")
}

/// Parses the file into entries numbered from 1, header excluded.
fn parse_change_log(
    bytes: &[u8],
    context: &str,
    source_file_path: &str,
) -> Result<Vec<NewChangeLogEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers = reader.headers()?.clone();
    let mut entries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        entries.push(NewChangeLogEntry {
            timestamp: column(&headers, &record, COLUMN_TIMESTAMP).to_string(),
            player_name: column(&headers, &record, COLUMN_PLAYER_NAME).to_string(),
            player_uuid: column(&headers, &record, COLUMN_PLAYER_UUID).to_string(),
            class_name: column(&headers, &record, COLUMN_CLASS).to_string(),
            entry_id: column(&headers, &record, COLUMN_ID).to_string(),
            entry_name: column(&headers, &record, COLUMN_NAME).to_string(),
            position: column(&headers, &record, COLUMN_POSITION).to_string(),
            change_type: column(&headers, &record, COLUMN_CHANGE).to_string(),
            old_data: column(&headers, &record, COLUMN_OLD_DATA).to_string(),
            new_data: column(&headers, &record, COLUMN_NEW_DATA).to_string(),
            source_file_path: source_file_path.to_string(),
            source_line: index as i64 + 1,
            dimension_context: context.to_string(),
        });
    }
    Ok(entries)
}

/// Hex sha256 over the CSV columns of `entries`, in order.
fn records_digest(entries: &[NewChangeLogEntry]) -> String {
    let mut hasher = Sha256::new();
    for entry in entries {
        for field in [
            &entry.timestamp,
            &entry.player_name,
            &entry.player_uuid,
            &entry.class_name,
            &entry.entry_id,
            &entry.entry_name,
            &entry.position,
            &entry.change_type,
            &entry.old_data,
            &entry.new_data,
        ] {
            hasher.update(field.as_bytes());
            hasher.update(b"\x1f");
        }
        hasher.update(b"\x1e");
    }
    format!("{:x}", hasher.finalize())
}

async fn append_file(
    conn: &mut SqliteConnection,
    context: &str,
    candidate: &LogFileCandidate,
    file_key: &str,
    stored: Option<&ChangeLogFileState>,
) -> Result<u64> {
    let bytes = fs::read(&candidate.path).await?;
    let entries = parse_change_log(&bytes, context, file_key)
        .with_context(|| format!("malformed csv {}", candidate.path.display()))?;
    let record_count = entries.len() as i64;
    let rows_consumed = stored.map(|state| state.rows_consumed).unwrap_or(0);
    let prefix_len = usize::try_from(rows_consumed.clamp(0, record_count)).unwrap_or(0);
    let prefix_unchanged = match stored.and_then(|state| state.prefix_digest.as_deref()) {
        Some(digest) => records_digest(&entries[..prefix_len]) == digest,
        None => true,
    };
    let cursor = append_cursor(record_count, rows_consumed, prefix_unchanged);

    let mut rows = 0;
    for entry in entries.iter().filter(|entry| entry.source_line > cursor) {
        insert_change_log(conn, entry).await?;
        rows += 1;
    }

    let state = ChangeLogFileState {
        file_path: file_key.to_string(),
        last_modified: candidate.modified_millis,
        last_processed: current_millis(),
        dimension_context: context.to_string(),
        rows_consumed: record_count,
        prefix_digest: Some(records_digest(&entries)),
    };
    upsert_change_log_file(conn, &state).await?;
    Ok(rows)
}

#[async_trait]
impl Scanner for ChangeLogScanner {
    fn name(&self) -> &'static str {
        "change_log"
    }

    async fn scan_once(&self) -> Result<ScanReport> {
        let started = Instant::now();
        let mut report = ScanReport::new(self.name());
        let worlds = self.layout.worlds().to_vec();
        let groups = tokio::task::spawn_blocking(move || discover(&worlds)).await?;

        let mut tx = self.store.pool().begin().await?;
        for (context, candidates) in groups {
            let warm = context_is_warm(&mut tx, &context).await?;
            for candidate in select_change_log_files(candidates, warm) {
                self.sync_file(&mut tx, &context, &candidate, &mut report)
                    .await?;
            }
        }
        tx.commit().await?;

        report.elapsed_ms = started.elapsed().as_millis() as u64;
        if report.changed_anything() {
            info!(
                "change log sync: {} files processed, {} rows inserted in {} ms",
                report.files_processed, report.rows_written, report.elapsed_ms
            );
        }
        Ok(report)
    }
}
