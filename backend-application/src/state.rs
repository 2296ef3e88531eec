use std::sync::Arc;

use backend_domain::ports::{
    ChangeLogRepository, HealthCheckService, HostGateway, IdentityRepository, NbtCacheRepository,
    NbtDecoder, PlayerBlobSource, PlayerRecordRepository, ReadOnlySqlRepository,
    SessionRepository,
};
use backend_domain::RuntimeConfig;

use crate::{Metrics, ScanOrchestrator};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub player_records: Arc<dyn PlayerRecordRepository>,
    pub change_logs: Arc<dyn ChangeLogRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub identities: Arc<dyn IdentityRepository>,
    pub nbt_cache: Arc<dyn NbtCacheRepository>,
    pub sql: Arc<dyn ReadOnlySqlRepository>,
    pub blob_source: Arc<dyn PlayerBlobSource>,
    pub nbt_decoder: Arc<dyn NbtDecoder>,
    pub host: Arc<dyn HostGateway>,
    pub health: Arc<dyn HealthCheckService>,
    pub orchestrator: Arc<ScanOrchestrator>,
    pub metrics: Arc<Metrics>,
}
