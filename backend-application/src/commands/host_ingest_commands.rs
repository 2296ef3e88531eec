use backend_domain::{HostSessionEvent, NewPlayerSession};
use chrono::Utc;
use tracing::debug;

use crate::dtos::{HostIngestBatch, HostIngestEvent, IngestAck};
use crate::error::{database, internal};
use crate::{AppError, AppState};

/// Applies host pushes in order. Session events are also kept in the session log.
/// The ack carries balance writes the host still has to apply; an empty batch just polls them.
pub async fn ingest_host_events(
    state: &AppState,
    batch: HostIngestBatch,
) -> Result<IngestAck, AppError> {
    let accepted = batch.events.len();
    for event in batch.events {
        match event {
            HostIngestEvent::Session(event) => {
                if event.player_uuid.trim().is_empty() {
                    return Err(AppError::invalid("player_uuid is required"));
                }
                let session = session_row(&event, Utc::now().timestamp_millis());
                let id = state
                    .sessions
                    .insert_session(&session)
                    .await
                    .map_err(database("record player session"))?;
                debug!(
                    id,
                    event_type = session.event_type.as_str(),
                    player_uuid = session.player_uuid.as_str(),
                    "session event recorded"
                );
                state
                    .host
                    .apply_session_event(event)
                    .await
                    .map_err(internal("apply session event"))?;
            }
            HostIngestEvent::Snapshot(snapshot) => {
                state
                    .host
                    .apply_snapshot(snapshot)
                    .await
                    .map_err(internal("apply host snapshot"))?;
            }
        }
    }
    let balance_writes = state
        .host
        .pending_balance_writes()
        .await
        .map_err(internal("read pending balance writes"))?;
    Ok(IngestAck {
        accepted,
        balance_writes,
    })
}

fn session_row(event: &HostSessionEvent, now_millis: i64) -> NewPlayerSession {
    NewPlayerSession {
        event_type: event.event_type,
        occurred_at: event.occurred_at.unwrap_or(now_millis),
        player_uuid: event.player_uuid.trim().to_string(),
        player_name: event.player_name.clone(),
        player_ip: event.player_ip.clone(),
        world_name: event.world_name.clone(),
        dimension_key: event.dimension_key.clone(),
        x: event.x,
        y: event.y,
        z: event.z,
    }
}
