use serde::Deserialize;

use backend_domain::{HostSessionEvent, HostSnapshot};

/// One push from the game host.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostIngestEvent {
    Session(HostSessionEvent),
    Snapshot(HostSnapshot),
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostIngestBatch {
    pub events: Vec<HostIngestEvent>,
}
