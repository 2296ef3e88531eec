// Real store and host context behind the router, for handler tests

use std::sync::Arc;

use tempfile::TempDir;

use backend_application::{AppState, Metrics, ScanOrchestrator};
use backend_domain::{ReadOnlySqlRepository, RuntimeConfig};
use backend_infrastructure::{
    DefaultHealthService, GzipNbtDecoder, HostContext, SqliteStore, WorldBlobSource, WorldLayout,
};

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        key: "secret".to_string(),
        server_root: ".".to_string(),
        world_dirs: vec!["world".to_string()],
        database_path: "beacon.db".to_string(),
        interval_time_ticks: 200,
        nbt_cache_ttl_minutes: 10,
        host_call_timeout_seconds: 1,
        max_body_bytes: 64 * 1024,
        request_timeout_seconds: 5,
        version: 1,
    }
}

pub struct TestServer {
    pub state: AppState,
    pub store: SqliteStore,
    _dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = runtime_config();
        config.server_root = dir.path().to_string_lossy().to_string();
        config.world_dirs = vec![dir.path().join("world").to_string_lossy().to_string()];

        let store = SqliteStore::open(dir.path().join("beacon.db")).await.unwrap();
        let layout = WorldLayout::from_config(&config);
        let (host, _worker) = HostContext::spawn(config.host_call_timeout());
        let metrics = Arc::new(Metrics::default());
        let sql: Arc<dyn ReadOnlySqlRepository> = Arc::new(store.clone());

        let state = AppState {
            player_records: Arc::new(store.clone()),
            change_logs: Arc::new(store.clone()),
            sessions: Arc::new(store.clone()),
            identities: Arc::new(store.clone()),
            nbt_cache: Arc::new(store.clone()),
            health: Arc::new(DefaultHealthService::new(sql.clone())),
            sql,
            blob_source: Arc::new(WorldBlobSource::new(layout)),
            nbt_decoder: Arc::new(GzipNbtDecoder),
            host: Arc::new(host),
            orchestrator: Arc::new(ScanOrchestrator::new(Vec::new(), metrics.clone())),
            metrics,
            config,
        };
        Self {
            state,
            store,
            _dir: dir,
        }
    }
}
