use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::{error, info};

use backend_application::commands::ingest_host_events;
use backend_application::dtos::{HostIngestBatch, IngestAck};
use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn ingest_host(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<IngestAck>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }

    let batch: HostIngestBatch = serde_json::from_slice(&body).map_err(|err| {
        error!("failed to parse host ingest body: {}", err);
        HttpError::BadRequest(err.to_string())
    })?;
    let ack = ingest_host_events(&state, batch).await?;
    if ack.accepted > 0 {
        info!(accepted = ack.accepted, "host events ingested");
    }
    Ok(Json(ack))
}
