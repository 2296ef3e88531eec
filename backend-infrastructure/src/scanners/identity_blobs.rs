use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Acquire, Sqlite, SqliteConnection, Transaction};
use tokio::fs;
use tracing::{error, info, warn};

use backend_domain::{
    extract_identity, should_process, FileSyncState, NbtCacheEntry, NbtDecoder, ScanReport,
    Scanner, SourceKind,
};

use super::world_files::{PlayerFile, WorldLayout, PLAYERDATA_DIR};
use crate::repositories::{
    find_sync_stamp, upsert_identity_on, upsert_nbt_cache_on, upsert_sync_state, SqliteStore,
};
use crate::utils::{current_millis, modified_millis};

/// Shortest file stem treated as a player id (hex uuid without dashes).
const MIN_PLAYER_ID_LEN: usize = 32;

/// Refreshes player identities and the decoded-blob cache from `playerdata/*.dat`.
pub struct IdentityBlobScanner {
    store: SqliteStore,
    layout: WorldLayout,
    decoder: Arc<dyn NbtDecoder>,
}

impl IdentityBlobScanner {
    pub fn new(store: SqliteStore, layout: WorldLayout, decoder: Arc<dyn NbtDecoder>) -> Self {
        Self {
            store,
            layout,
            decoder,
        }
    }

    async fn sync_file(
        &self,
        tx: &mut Transaction<'static, Sqlite>,
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
        let stored = find_sync_stamp(tx, SourceKind::PlayerData, &tracker_path).await?;
        if !should_process(stored, modified) {
            report.files_skipped += 1;
            return Ok(());
        }

        let mut savepoint = tx.begin().await?;
        match self
            .apply_blob(&mut savepoint, file, &tracker_path, modified)
            .await
        {
            Ok(rows) => {
                savepoint.commit().await?;
                report.files_processed += 1;
                report.rows_written += rows;
            }
            Err(err) => {
                savepoint.rollback().await?;
                report.files_failed += 1;
                error!("failed to read player data {}: {:#}", file.path.display(), err);
            }
        }
        Ok(())
    }

    async fn apply_blob(
        &self,
        conn: &mut SqliteConnection,
        file: &PlayerFile,
        tracker_path: &str,
        modified: i64,
    ) -> Result<u64> {
        let bytes = fs::read(&file.path).await?;
        let decoded = self.decoder.decode(&bytes)?;
        let now = current_millis();
        let mut rows = 0;

        if let Some(update) = extract_identity(&decoded).into_update(&file.player_uuid, now) {
            upsert_identity_on(conn, &update).await?;
            rows += 1;
        }
        let cache = NbtCacheEntry {
            player_uuid: file.player_uuid.clone(),
            raw_json: decoded.to_string(),
            cached_at: now,
        };
        upsert_nbt_cache_on(conn, &cache).await?;
        rows += 1;

        let state = FileSyncState::new(
            SourceKind::PlayerData,
            Some(file.player_uuid.clone()),
            tracker_path,
            modified,
            now,
        );
        upsert_sync_state(conn, &state).await?;
        Ok(rows)
    }
}

#[async_trait]
impl Scanner for IdentityBlobScanner {
    fn name(&self) -> &'static str {
        "identity_blobs"
    }

    async fn scan_once(&self) -> Result<ScanReport> {
        let started = Instant::now();
        let mut report = ScanReport::new(self.name());
        let files: Vec<PlayerFile> = self
            .layout
            .player_files(PLAYERDATA_DIR, "dat")
            .await?
            .into_iter()
            .filter(|file| file.player_uuid.len() >= MIN_PLAYER_ID_LEN)
            .collect();

        let mut tx = self.store.pool().begin().await?;
        for file in &files {
            self.sync_file(&mut tx, file, &mut report).await?;
        }
        tx.commit().await?;

        report.elapsed_ms = started.elapsed().as_millis() as u64;
        if report.changed_anything() {
            info!(
                "player data sync: {} files processed, {} records written in {} ms",
                report.files_processed, report.rows_written, report.elapsed_ms
            );
        }
        Ok(report)
    }
}
