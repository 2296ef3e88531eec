// World folder layout
// Each world keeps per-player files under advancements/, stats/ and playerdata/

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use backend_domain::{PlayerBlobSource, RuntimeConfig};

use crate::utils::slash_path;

pub const ADVANCEMENTS_DIR: &str = "advancements";
pub const STATS_DIR: &str = "stats";
pub const PLAYERDATA_DIR: &str = "playerdata";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerFile {
    pub player_uuid: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct WorldLayout {
    server_root: PathBuf,
    worlds: Vec<PathBuf>,
}

impl WorldLayout {
    pub fn new(server_root: impl Into<PathBuf>, worlds: Vec<PathBuf>) -> Self {
        Self {
            server_root: server_root.into(),
            worlds,
        }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(
            &config.server_root,
            config.world_dirs.iter().map(PathBuf::from).collect(),
        )
    }

    pub fn worlds(&self) -> &[PathBuf] {
        &self.worlds
    }

    /// Tracker key for a file: server-root-relative, `/`-separated.
    pub fn tracker_path(&self, path: &Path) -> String {
        slash_path(&self.server_root, path)
    }

    /// Files `<world>/<subdir>/<uuid>.<extension>` across all worlds, extension case-insensitive.
    pub async fn player_files(&self, subdir: &str, extension: &str) -> Result<Vec<PlayerFile>> {
        let mut files = Vec::new();
        for world in &self.worlds {
            let dir = world.join(subdir);
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    debug!("{} does not exist, skipping", dir.display());
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if !entry.file_type().await?.is_file() {
                    continue;
                }
                let matches_extension = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case(extension))
                    .unwrap_or(false);
                let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                    continue;
                };
                if matches_extension && !stem.is_empty() {
                    files.push(PlayerFile {
                        player_uuid: stem.to_string(),
                        path: path.clone(),
                    });
                }
            }
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    /// First world holding `playerdata/<uuid>.dat`.
    pub async fn find_player_blob(&self, player_uuid: &str) -> Option<PathBuf> {
        for world in &self.worlds {
            let candidate = world
                .join(PLAYERDATA_DIR)
                .join(format!("{}.dat", player_uuid));
            if fs::metadata(&candidate)
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false)
            {
                return Some(candidate);
            }
        }
        None
    }
}

/// Reads raw player blobs straight from the world folders.
pub struct WorldBlobSource {
    layout: WorldLayout,
}

impl WorldBlobSource {
    pub fn new(layout: WorldLayout) -> Self {
        Self { layout }
    }
}

#[async_trait]
impl PlayerBlobSource for WorldBlobSource {
    async fn read_player_blob(&self, player_uuid: &str) -> Result<Option<Vec<u8>>> {
        // Path separators in the id would escape playerdata/.
        if player_uuid.contains(['/', '\\']) || player_uuid.contains("..") {
            return Ok(None);
        }
        let Some(path) = self.layout.find_player_blob(player_uuid).await else {
            return Ok(None);
        };
        Ok(Some(fs::read(path).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_player_files_across_worlds() {
        let dir = tempfile::tempdir().unwrap();
        let world = dir.path().join("world");
        let nether = dir.path().join("world_nether");
        std::fs::create_dir_all(world.join(STATS_DIR)).unwrap();
        std::fs::create_dir_all(nether.join(STATS_DIR)).unwrap();
        std::fs::write(world.join(STATS_DIR).join("aaa.json"), "{}").unwrap();
        std::fs::write(nether.join(STATS_DIR).join("bbb.JSON"), "{}").unwrap();
        std::fs::write(world.join(STATS_DIR).join("notes.txt"), "").unwrap();

        let layout = WorldLayout::new(dir.path(), vec![world, nether, dir.path().join("missing")]);
        let files = layout.player_files(STATS_DIR, "json").await.unwrap();
        let ids: Vec<_> = files.iter().map(|f| f.player_uuid.as_str()).collect();
        assert_eq!(ids, vec!["aaa", "bbb"]);
        assert_eq!(layout.tracker_path(&files[1].path), "world_nether/stats/bbb.JSON");
    }

    #[tokio::test]
    async fn blob_source_reads_first_match_and_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let world = dir.path().join("world");
        std::fs::create_dir_all(world.join(PLAYERDATA_DIR)).unwrap();
        std::fs::write(world.join(PLAYERDATA_DIR).join("abc.dat"), [1u8, 2, 3]).unwrap();

        let source = WorldBlobSource::new(WorldLayout::new(dir.path(), vec![world]));
        assert_eq!(source.read_player_blob("abc").await.unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(source.read_player_blob("nobody").await.unwrap(), None);
        assert_eq!(source.read_player_blob("../abc").await.unwrap(), None);
    }
}
