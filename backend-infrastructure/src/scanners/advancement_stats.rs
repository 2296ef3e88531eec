use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Acquire, Sqlite, SqliteConnection, Transaction};
use tokio::fs;
use tracing::{error, info, warn};

use backend_domain::{
    advancement_entries, flatten_stats, should_process, FileSyncState, ScanReport, Scanner,
    SourceKind,
};

use super::world_files::{PlayerFile, WorldLayout, ADVANCEMENTS_DIR, STATS_DIR};
use crate::repositories::{find_sync_stamp, upsert_sync_state, SqliteStore};
use crate::utils::{current_millis, modified_millis};

/// Mirrors per-player advancement and statistics JSON into row form.
pub struct AdvancementStatsScanner {
    store: SqliteStore,
    layout: WorldLayout,
}

impl AdvancementStatsScanner {
    pub fn new(store: SqliteStore, layout: WorldLayout) -> Self {
        Self { store, layout }
    }

    async fn sync_file(
        &self,
        tx: &mut Transaction<'static, Sqlite>,
        kind: SourceKind,
        file: &PlayerFile,
        report: &mut ScanReport,
    ) -> Result<()> {
        let metadata = match fs::metadata(&file.path).await {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!("cannot stat {}: {}", file.path.display(), err);
                report.files_failed += 1;
                return Ok(());
            }
        };
        let modified = modified_millis(&metadata);
        let tracker_path = self.layout.tracker_path(&file.path);
        let stored = find_sync_stamp(tx, kind, &tracker_path).await?;
        if !should_process(stored, modified) {
            report.files_skipped += 1;
            return Ok(());
        }

        let mut savepoint = tx.begin().await?;
        match apply_player_file(&mut savepoint, kind, file, &tracker_path, modified).await {
            Ok(rows) => {
                savepoint.commit().await?;
                report.files_processed += 1;
                report.rows_written += rows;
            }
            Err(err) => {
                savepoint.rollback().await?;
                report.files_failed += 1;
                error!(
                    "failed to sync {} file {}: {:#}",
                    kind.as_str(),
                    file.path.display(),
                    err
                );
            }
        }
        Ok(())
    }
}

/// Replaces every row of the player for this kind, then records the file as processed.
async fn apply_player_file(
    conn: &mut SqliteConnection,
    kind: SourceKind,
    file: &PlayerFile,
    tracker_path: &str,
    modified: i64,
) -> Result<u64> {
    let bytes = fs::read(&file.path).await?;
    let root: Value = serde_json::from_slice(&bytes)?;
    let now = current_millis();
    let mut rows = 0;

    match kind {
        SourceKind::Advancements => {
            sqlx::query("DELETE FROM player_advancements WHERE player_uuid = ?")
                .bind(&file.player_uuid)
                .execute(&mut *conn)
                .await?;
            for entry in advancement_entries(&root) {
                sqlx::query(
                    "INSERT INTO player_advancements (player_uuid, advancement_key, value, last_updated) VALUES (?, ?, ?, ?)",
                )
                .bind(&file.player_uuid)
                .bind(&entry.key)
                .bind(entry.value.into_bytes())
                .bind(now)
                .execute(&mut *conn)
                .await?;
                rows += 1;
            }
        }
        SourceKind::Stats => {
            sqlx::query("DELETE FROM player_stats WHERE player_uuid = ?")
                .bind(&file.player_uuid)
                .execute(&mut *conn)
                .await?;
            for entry in flatten_stats(&root) {
                sqlx::query(
                    "INSERT INTO player_stats (player_uuid, stat_key, value, last_updated) VALUES (?, ?, ?, ?)",
                )
                .bind(&file.player_uuid)
                .bind(&entry.key)
                .bind(entry.value)
                .bind(now)
                .execute(&mut *conn)
                .await?;
                rows += 1;
            }
        }
        SourceKind::PlayerData => {}
    }

    let state = FileSyncState::new(
        kind,
        Some(file.player_uuid.clone()),
        tracker_path,
        modified,
        now,
    );
    upsert_sync_state(conn, &state).await?;
    Ok(rows)
}

#[async_trait]
impl Scanner for AdvancementStatsScanner {
    fn name(&self) -> &'static str {
        "advancements_stats"
    }

    async fn scan_once(&self) -> Result<ScanReport> {
        let started = Instant::now();
        let mut report = ScanReport::new(self.name());
        let mut tx = self.store.pool().begin().await?;

        for (kind, subdir) in [
            (SourceKind::Advancements, ADVANCEMENTS_DIR),
            (SourceKind::Stats, STATS_DIR),
        ] {
            for file in self.layout.player_files(subdir, "json").await? {
                self.sync_file(&mut tx, kind, &file, &mut report).await?;
            }
        }

        tx.commit().await?;
        report.elapsed_ms = started.elapsed().as_millis() as u64;
        if report.changed_anything() {
            info!(
                "advancements/stats sync: {} files processed, {} records written in {} ms",
                report.files_processed, report.rows_written, report.elapsed_ms
            );
        }
        Ok(report)
    }
}
