use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::info;

use backend_application::{AppState, Metrics, ScanOrchestrator};
use backend_domain::{NbtDecoder, ReadOnlySqlRepository, Scanner};
use backend_infrastructure::{
    AdvancementStatsScanner, AppConfig, ChangeLogScanner, DefaultHealthService, GzipNbtDecoder,
    HostContext, IdentityBlobScanner, SqliteStore, WorldBlobSource, WorldLayout,
};

pub struct AppContext {
    pub state: AppState,
    pub store: SqliteStore,
    pub host_worker: JoinHandle<()>,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let store = SqliteStore::open(&runtime_config.database_path).await?;
        let layout = WorldLayout::from_config(&runtime_config);
        let decoder: Arc<dyn NbtDecoder> = Arc::new(GzipNbtDecoder);
        let (host, host_worker) = HostContext::spawn(runtime_config.host_call_timeout());
        let metrics = Arc::new(Metrics::default());

        let scanners: Vec<Arc<dyn Scanner>> = vec![
            Arc::new(AdvancementStatsScanner::new(store.clone(), layout.clone())),
            Arc::new(ChangeLogScanner::new(store.clone(), layout.clone())),
            Arc::new(IdentityBlobScanner::new(
                store.clone(),
                layout.clone(),
                decoder.clone(),
            )),
        ];
        info!(
            worlds = runtime_config.world_dirs.len(),
            scanners = scanners.len(),
            "scanners configured"
        );

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
            nbt_decoder: decoder,
            host: Arc::new(host),
            orchestrator: Arc::new(ScanOrchestrator::new(scanners, metrics.clone())),
            metrics,
            config: runtime_config,
        };

        Ok(Self {
            state,
            store,
            host_worker,
        })
    }
}
