use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use crate::entities::{
    AdvancementEntry, AdvancementMap, ChangeLogEntry, ChangeLogFilter, DataTotals,
    IdentityUpdate, NbtCacheEntry, NewPlayerSession, PlayerIdentity, PlayerSession,
    SessionFilter, SqlQueryResult, StatEntry, StatMap,
};
use crate::value_objects::{FilterKeys, PageWindow};

#[async_trait]
pub trait PlayerRecordRepository: Send + Sync {
    async fn count_advancements(
        &self,
        player_uuid: &str,
        keys: Option<&FilterKeys>,
    ) -> anyhow::Result<i64>;
    async fn fetch_advancements(
        &self,
        player_uuid: &str,
        keys: Option<&FilterKeys>,
        window: PageWindow,
    ) -> anyhow::Result<Vec<AdvancementEntry>>;
    async fn count_stats(&self, player_uuid: &str, keys: Option<&FilterKeys>)
        -> anyhow::Result<i64>;
    async fn fetch_stats(
        &self,
        player_uuid: &str,
        keys: Option<&FilterKeys>,
        window: PageWindow,
    ) -> anyhow::Result<Vec<StatEntry>>;
    /// Batch read keyed by player; players without matching rows are absent.
    async fn advancements_for_players(
        &self,
        player_uuids: &BTreeSet<String>,
        keys: &FilterKeys,
    ) -> anyhow::Result<BTreeMap<String, AdvancementMap>>;
    async fn stats_for_players(
        &self,
        player_uuids: &BTreeSet<String>,
        keys: &FilterKeys,
    ) -> anyhow::Result<BTreeMap<String, StatMap>>;
    async fn data_totals(&self) -> anyhow::Result<DataTotals>;
}

#[async_trait]
pub trait ChangeLogRepository: Send + Sync {
    async fn count_change_logs(&self, filter: &ChangeLogFilter) -> anyhow::Result<i64>;
    async fn fetch_change_logs(
        &self,
        filter: &ChangeLogFilter,
        window: PageWindow,
    ) -> anyhow::Result<Vec<ChangeLogEntry>>;
    async fn find_change_log(&self, id: i64) -> anyhow::Result<Option<ChangeLogEntry>>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn insert_session(&self, session: &NewPlayerSession) -> anyhow::Result<i64>;
    async fn count_sessions(&self, filter: &SessionFilter) -> anyhow::Result<i64>;
    async fn fetch_sessions(
        &self,
        filter: &SessionFilter,
        window: PageWindow,
    ) -> anyhow::Result<Vec<PlayerSession>>;
}

#[async_trait]
pub trait IdentityRepository: Send + Sync {
    async fn find_identity_by_uuid(&self, player_uuid: &str)
        -> anyhow::Result<Option<PlayerIdentity>>;
    /// Most recently updated identity carrying exactly this name.
    async fn find_identity_by_name(&self, player_name: &str)
        -> anyhow::Result<Option<PlayerIdentity>>;
    async fn count_identities(&self) -> anyhow::Result<i64>;
    async fn fetch_identities(&self, window: PageWindow) -> anyhow::Result<Vec<PlayerIdentity>>;
    async fn upsert_identity(&self, update: &IdentityUpdate) -> anyhow::Result<()>;
}

#[async_trait]
pub trait NbtCacheRepository: Send + Sync {
    async fn find_nbt_cache(&self, player_uuid: &str) -> anyhow::Result<Option<NbtCacheEntry>>;
    async fn upsert_nbt_cache(&self, entry: &NbtCacheEntry) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ReadOnlySqlRepository: Send + Sync {
    /// Runs an already validated statement, fetching at most `max_rows`.
    async fn execute_read_only(&self, sql: &str, max_rows: usize)
        -> anyhow::Result<SqlQueryResult>;
    async fn ping(&self) -> anyhow::Result<()>;
}
