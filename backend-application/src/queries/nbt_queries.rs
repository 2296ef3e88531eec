use backend_domain::{extract_identity, NbtCacheEntry, PlayerSelector};
use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::dtos::{PlayerLookupRequest, PlayerNbtResponse};
use crate::error::{database, internal};
use crate::queries::player_resolution::ensure_player_uuid;
use crate::{AppError, AppState};

pub async fn get_player_nbt(
    state: &AppState,
    request: PlayerLookupRequest,
) -> Result<PlayerNbtResponse, AppError> {
    let selector = PlayerSelector::new(request.player_uuid, request.player_name);
    let player_uuid = ensure_player_uuid(state, &selector)
        .await?
        .ok_or(AppError::NotFound)?;
    let nbt = read_through(state, &player_uuid).await?;
    Ok(PlayerNbtResponse { player_uuid, nbt })
}

/// Fresh cache rows are served as-is; otherwise the blob is decoded and the
/// cache refreshed. `None` when no world holds a blob for the player.
async fn read_through(state: &AppState, player_uuid: &str) -> Result<Option<Value>, AppError> {
    let now = Utc::now().timestamp_millis();
    let cached = state
        .nbt_cache
        .find_nbt_cache(player_uuid)
        .await
        .map_err(database("read nbt cache"))?;
    if let Some(entry) = cached {
        if entry.is_fresh(now, state.config.nbt_cache_ttl_millis()) {
            let value = serde_json::from_str(&entry.raw_json)
                .map_err(|err| internal("parse cached nbt")(err.into()))?;
            return Ok(Some(value));
        }
    }

    let Some(bytes) = state
        .blob_source
        .read_player_blob(player_uuid)
        .await
        .map_err(internal("read player data"))?
    else {
        debug!(player_uuid, "no player data file found");
        return Ok(None);
    };
    let decoded = state
        .nbt_decoder
        .decode(&bytes)
        .map_err(internal("decode player data"))?;

    state
        .nbt_cache
        .upsert_nbt_cache(&NbtCacheEntry {
            player_uuid: player_uuid.to_string(),
            raw_json: decoded.to_string(),
            cached_at: now,
        })
        .await
        .map_err(database("store nbt cache"))?;
    if let Some(update) = extract_identity(&decoded).into_update(player_uuid, now) {
        state
            .identities
            .upsert_identity(&update)
            .await
            .map_err(database("update player identity"))?;
    }
    Ok(Some(decoded))
}
