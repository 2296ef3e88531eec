use async_trait::async_trait;
use serde_json::Value;

use crate::entities::{
    BalanceEntry, HostSessionEvent, HostSnapshot, OnlinePlayer, ScanReport, ServerBasics,
    ServerTime,
};

/// One incremental file-to-row pass over a single source format.
#[async_trait]
pub trait Scanner: Send + Sync {
    fn name(&self) -> &'static str;
    async fn scan_once(&self) -> anyhow::Result<ScanReport>;
}

/// Turns a raw player-data blob into a JSON tree.
pub trait NbtDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> anyhow::Result<Value>;
}

#[async_trait]
pub trait PlayerBlobSource: Send + Sync {
    /// Current blob for the player, `None` when no world holds one.
    async fn read_player_blob(&self, player_uuid: &str) -> anyhow::Result<Option<Vec<u8>>>;
}

/// Live host state, served from the single host-context worker.
#[async_trait]
pub trait HostGateway: Send + Sync {
    async fn online_players(&self) -> anyhow::Result<Vec<OnlinePlayer>>;
    async fn server_time(&self) -> anyhow::Result<ServerTime>;
    async fn server_basics(&self) -> anyhow::Result<ServerBasics>;
    /// `Ok(None)` when the balance objective does not exist.
    async fn balance(&self, player: &str) -> anyhow::Result<Option<i64>>;
    async fn set_balance(&self, player: &str, amount: i64) -> anyhow::Result<Option<i64>>;
    async fn add_balance(&self, player: &str, amount: i64) -> anyhow::Result<Option<i64>>;
    async fn list_balances(&self) -> anyhow::Result<Option<Vec<BalanceEntry>>>;
    /// Balance writes made here that the host has not reported back yet, as absolute values.
    async fn pending_balance_writes(&self) -> anyhow::Result<Vec<BalanceEntry>>;
    async fn apply_snapshot(&self, snapshot: HostSnapshot) -> anyhow::Result<()>;
    async fn apply_session_event(&self, event: HostSessionEvent) -> anyhow::Result<()>;
}

#[async_trait]
pub trait HealthCheckService: Send + Sync {
    async fn check_database(&self) -> anyhow::Result<bool>;
}
