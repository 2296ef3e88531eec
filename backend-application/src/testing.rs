// In-memory port fakes shared by the application tests

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use backend_domain::*;

use crate::{AppState, Metrics, ScanOrchestrator};

#[derive(Default)]
pub struct MemoryStore {
    pub advancements: Mutex<Vec<(String, AdvancementEntry)>>,
    pub stats: Mutex<Vec<(String, StatEntry)>>,
    pub change_logs: Mutex<Vec<ChangeLogEntry>>,
    pub sessions: Mutex<Vec<NewPlayerSession>>,
    pub identities: Mutex<HashMap<String, PlayerIdentity>>,
    pub nbt_cache: Mutex<HashMap<String, NbtCacheEntry>>,
    pub store_calls: AtomicUsize,
    pub last_filter: Mutex<Option<SessionFilter>>,
}

impl MemoryStore {
    fn touch(&self) {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }

    pub fn add_identity(&self, uuid: &str, name: &str, last_updated: i64) {
        self.identities.lock().unwrap().insert(
            uuid.to_string(),
            PlayerIdentity {
                player_uuid: uuid.to_string(),
                player_name: Some(name.to_string()),
                first_played: None,
                last_played: None,
                last_updated: Some(last_updated),
            },
        );
    }

    pub fn add_stat(&self, uuid: &str, key: &str, value: i64) {
        self.stats.lock().unwrap().push((
            uuid.to_string(),
            StatEntry {
                key: key.to_string(),
                value,
            },
        ));
    }

    fn keyed<T: Clone>(
        rows: &[(String, T)],
        uuid: &str,
        keys: Option<&FilterKeys>,
        key_of: impl Fn(&T) -> &str,
    ) -> Vec<T> {
        let mut out: Vec<T> = rows
            .iter()
            .filter(|(owner, _)| owner == uuid)
            .filter(|(_, row)| keys.map_or(true, |keys| keys.contains(key_of(row))))
            .map(|(_, row)| row.clone())
            .collect();
        out.sort_by(|a, b| key_of(a).cmp(key_of(b)));
        out
    }
}

fn paged<T>(rows: Vec<T>, window: PageWindow) -> Vec<T> {
    rows.into_iter()
        .skip(window.offset as usize)
        .take(window.limit as usize)
        .collect()
}

#[async_trait]
impl PlayerRecordRepository for MemoryStore {
    async fn count_advancements(
        &self,
        player_uuid: &str,
        keys: Option<&FilterKeys>,
    ) -> anyhow::Result<i64> {
        self.touch();
        let rows = self.advancements.lock().unwrap();
        Ok(Self::keyed(&rows, player_uuid, keys, |row| row.key.as_str()).len() as i64)
    }

    async fn fetch_advancements(
        &self,
        player_uuid: &str,
        keys: Option<&FilterKeys>,
        window: PageWindow,
    ) -> anyhow::Result<Vec<AdvancementEntry>> {
        self.touch();
        let rows = self.advancements.lock().unwrap();
        Ok(paged(
            Self::keyed(&rows, player_uuid, keys, |row| row.key.as_str()),
            window,
        ))
    }

    async fn count_stats(
        &self,
        player_uuid: &str,
        keys: Option<&FilterKeys>,
    ) -> anyhow::Result<i64> {
        self.touch();
        let rows = self.stats.lock().unwrap();
        Ok(Self::keyed(&rows, player_uuid, keys, |row| row.key.as_str()).len() as i64)
    }

    async fn fetch_stats(
        &self,
        player_uuid: &str,
        keys: Option<&FilterKeys>,
        window: PageWindow,
    ) -> anyhow::Result<Vec<StatEntry>> {
        self.touch();
        let rows = self.stats.lock().unwrap();
        Ok(paged(
            Self::keyed(&rows, player_uuid, keys, |row| row.key.as_str()),
            window,
        ))
    }

    async fn advancements_for_players(
        &self,
        player_uuids: &BTreeSet<String>,
        keys: &FilterKeys,
    ) -> anyhow::Result<BTreeMap<String, AdvancementMap>> {
        self.touch();
        let mut out: BTreeMap<String, AdvancementMap> = BTreeMap::new();
        for (owner, row) in self.advancements.lock().unwrap().iter() {
            if player_uuids.contains(owner) && keys.contains(&row.key) {
                out.entry(owner.clone())
                    .or_default()
                    .insert(row.key.clone(), row.value.clone());
            }
        }
        Ok(out)
    }

    async fn stats_for_players(
        &self,
        player_uuids: &BTreeSet<String>,
        keys: &FilterKeys,
    ) -> anyhow::Result<BTreeMap<String, StatMap>> {
        self.touch();
        let mut out: BTreeMap<String, StatMap> = BTreeMap::new();
        for (owner, row) in self.stats.lock().unwrap().iter() {
            if player_uuids.contains(owner) && keys.contains(&row.key) {
                out.entry(owner.clone())
                    .or_default()
                    .insert(row.key.clone(), row.value);
            }
        }
        Ok(out)
    }

    async fn data_totals(&self) -> anyhow::Result<DataTotals> {
        self.touch();
        Ok(DataTotals {
            mtr_logs_total: self.change_logs.lock().unwrap().len() as i64,
            stats_total: self.stats.lock().unwrap().len() as i64,
            advancements_total: self.advancements.lock().unwrap().len() as i64,
        })
    }
}

#[async_trait]
impl ChangeLogRepository for MemoryStore {
    async fn count_change_logs(&self, filter: &ChangeLogFilter) -> anyhow::Result<i64> {
        self.touch();
        let rows = self.change_logs.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|row| filter.player_uuid.is_none() || row.player_uuid == filter.player_uuid)
            .count() as i64)
    }

    async fn fetch_change_logs(
        &self,
        filter: &ChangeLogFilter,
        window: PageWindow,
    ) -> anyhow::Result<Vec<ChangeLogEntry>> {
        self.touch();
        let rows: Vec<ChangeLogEntry> = self
            .change_logs
            .lock()
            .unwrap()
            .iter()
            .filter(|row| filter.player_uuid.is_none() || row.player_uuid == filter.player_uuid)
            .cloned()
            .collect();
        Ok(paged(rows, window))
    }

    async fn find_change_log(&self, id: i64) -> anyhow::Result<Option<ChangeLogEntry>> {
        self.touch();
        Ok(self
            .change_logs
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn insert_session(&self, session: &NewPlayerSession) -> anyhow::Result<i64> {
        self.touch();
        let mut sessions = self.sessions.lock().unwrap();
        sessions.push(session.clone());
        Ok(sessions.len() as i64)
    }

    async fn count_sessions(&self, filter: &SessionFilter) -> anyhow::Result<i64> {
        self.touch();
        *self.last_filter.lock().unwrap() = Some(filter.clone());
        Ok(self.sessions.lock().unwrap().len() as i64)
    }

    async fn fetch_sessions(
        &self,
        _filter: &SessionFilter,
        _window: PageWindow,
    ) -> anyhow::Result<Vec<PlayerSession>> {
        self.touch();
        Ok(Vec::new())
    }
}

#[async_trait]
impl IdentityRepository for MemoryStore {
    async fn find_identity_by_uuid(
        &self,
        player_uuid: &str,
    ) -> anyhow::Result<Option<PlayerIdentity>> {
        self.touch();
        Ok(self.identities.lock().unwrap().get(player_uuid).cloned())
    }

    async fn find_identity_by_name(
        &self,
        player_name: &str,
    ) -> anyhow::Result<Option<PlayerIdentity>> {
        self.touch();
        Ok(self
            .identities
            .lock()
            .unwrap()
            .values()
            .filter(|identity| identity.player_name.as_deref() == Some(player_name))
            .max_by_key(|identity| identity.last_updated)
            .cloned())
    }

    async fn count_identities(&self) -> anyhow::Result<i64> {
        self.touch();
        Ok(self.identities.lock().unwrap().len() as i64)
    }

    async fn fetch_identities(&self, window: PageWindow) -> anyhow::Result<Vec<PlayerIdentity>> {
        self.touch();
        let mut rows: Vec<PlayerIdentity> =
            self.identities.lock().unwrap().values().cloned().collect();
        rows.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(paged(rows, window))
    }

    async fn upsert_identity(&self, update: &IdentityUpdate) -> anyhow::Result<()> {
        self.touch();
        let mut identities = self.identities.lock().unwrap();
        let existing = identities.get(&update.player_uuid).cloned();
        identities.insert(
            update.player_uuid.clone(),
            PlayerIdentity {
                player_uuid: update.player_uuid.clone(),
                player_name: Some(update.player_name.clone()),
                first_played: update
                    .first_played
                    .or_else(|| existing.as_ref().and_then(|row| row.first_played)),
                last_played: update
                    .last_played
                    .or_else(|| existing.as_ref().and_then(|row| row.last_played)),
                last_updated: Some(update.observed_at),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl NbtCacheRepository for MemoryStore {
    async fn find_nbt_cache(&self, player_uuid: &str) -> anyhow::Result<Option<NbtCacheEntry>> {
        self.touch();
        Ok(self.nbt_cache.lock().unwrap().get(player_uuid).cloned())
    }

    async fn upsert_nbt_cache(&self, entry: &NbtCacheEntry) -> anyhow::Result<()> {
        self.touch();
        self.nbt_cache
            .lock()
            .unwrap()
            .insert(entry.player_uuid.clone(), entry.clone());
        Ok(())
    }
}

#[async_trait]
impl ReadOnlySqlRepository for MemoryStore {
    async fn execute_read_only(
        &self,
        _sql: &str,
        _max_rows: usize,
    ) -> anyhow::Result<SqlQueryResult> {
        self.touch();
        Ok(SqlQueryResult::default())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl HealthCheckService for MemoryStore {
    async fn check_database(&self) -> anyhow::Result<bool> {
        Ok(true)
    }
}

#[derive(Default)]
pub struct FakeHost {
    pub players: Mutex<Vec<OnlinePlayer>>,
    pub balances: Mutex<Option<BTreeMap<String, i64>>>,
    pub pending_writes: Mutex<Vec<BalanceEntry>>,
    pub snapshots: AtomicUsize,
    pub session_events: AtomicUsize,
}

impl FakeHost {
    pub fn with_balances(entries: &[(&str, i64)]) -> Self {
        let host = Self::default();
        *host.balances.lock().unwrap() = Some(
            entries
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        );
        host
    }
}

#[async_trait]
impl HostGateway for FakeHost {
    async fn online_players(&self) -> anyhow::Result<Vec<OnlinePlayer>> {
        Ok(self.players.lock().unwrap().clone())
    }

    async fn server_time(&self) -> anyhow::Result<ServerTime> {
        Ok(ServerTime::default())
    }

    async fn server_basics(&self) -> anyhow::Result<ServerBasics> {
        Ok(ServerBasics {
            server_max_players: 20,
            online_player_count: self.players.lock().unwrap().len() as i64,
        })
    }

    async fn balance(&self, player: &str) -> anyhow::Result<Option<i64>> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .as_ref()
            .map(|scores| scores.get(player).copied().unwrap_or(0)))
    }

    async fn set_balance(&self, player: &str, amount: i64) -> anyhow::Result<Option<i64>> {
        let mut balances = self.balances.lock().unwrap();
        Ok(balances.as_mut().map(|scores| {
            let value = clamp_score(amount);
            scores.insert(player.to_string(), value);
            value
        }))
    }

    async fn add_balance(&self, player: &str, amount: i64) -> anyhow::Result<Option<i64>> {
        let mut balances = self.balances.lock().unwrap();
        Ok(balances.as_mut().map(|scores| {
            let current = scores.get(player).copied().unwrap_or(0);
            let value = clamp_score(current.saturating_add(amount));
            scores.insert(player.to_string(), value);
            value
        }))
    }

    async fn list_balances(&self) -> anyhow::Result<Option<Vec<BalanceEntry>>> {
        Ok(self.balances.lock().unwrap().as_ref().map(|scores| {
            scores
                .iter()
                .map(|(player, balance)| BalanceEntry {
                    player: player.clone(),
                    balance: *balance,
                })
                .collect()
        }))
    }

    async fn pending_balance_writes(&self) -> anyhow::Result<Vec<BalanceEntry>> {
        Ok(self.pending_writes.lock().unwrap().clone())
    }

    async fn apply_snapshot(&self, _snapshot: HostSnapshot) -> anyhow::Result<()> {
        self.snapshots.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn apply_session_event(&self, _event: HostSessionEvent) -> anyhow::Result<()> {
        self.session_events.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeBlobs {
    pub blob: Option<Vec<u8>>,
    pub reads: AtomicUsize,
}

#[async_trait]
impl PlayerBlobSource for FakeBlobs {
    async fn read_player_blob(&self, _player_uuid: &str) -> anyhow::Result<Option<Vec<u8>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.blob.clone())
    }
}

pub struct FakeDecoder {
    pub value: Value,
    pub calls: AtomicUsize,
}

impl NbtDecoder for FakeDecoder {
    fn decode(&self, _bytes: &[u8]) -> anyhow::Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.value.clone())
    }
}

pub struct Harness {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub host: Arc<FakeHost>,
    pub blobs: Arc<FakeBlobs>,
    pub decoder: Arc<FakeDecoder>,
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        key: "secret".to_string(),
        server_root: ".".to_string(),
        world_dirs: vec!["world".to_string()],
        database_path: ":memory:".to_string(),
        interval_time_ticks: 200,
        nbt_cache_ttl_minutes: 10,
        host_call_timeout_seconds: 5,
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 30,
        version: 1,
    }
}

pub fn harness() -> Harness {
    harness_with(FakeHost::default(), FakeBlobs::default(), Value::Null)
}

pub fn harness_with(host: FakeHost, blobs: FakeBlobs, decoded: Value) -> Harness {
    let store = Arc::new(MemoryStore::default());
    let host = Arc::new(host);
    let blobs = Arc::new(blobs);
    let decoder = Arc::new(FakeDecoder {
        value: decoded,
        calls: AtomicUsize::new(0),
    });
    let metrics = Arc::new(Metrics::default());
    let state = AppState {
        config: runtime_config(),
        player_records: store.clone(),
        change_logs: store.clone(),
        sessions: store.clone(),
        identities: store.clone(),
        nbt_cache: store.clone(),
        sql: store.clone(),
        blob_source: blobs.clone(),
        nbt_decoder: decoder.clone(),
        host: host.clone(),
        health: store.clone(),
        orchestrator: Arc::new(ScanOrchestrator::new(Vec::new(), metrics.clone())),
        metrics,
    };
    Harness {
        state,
        store,
        host,
        blobs,
        decoder,
    }
}
