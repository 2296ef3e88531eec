use backend_domain::{FilterKeys, PageLimits, PageRequest, PlayerSelector};

use crate::dtos::{PlayerAdvancementsResponse, PlayerRecordsRequest, PlayerStatsResponse};
use crate::error::database;
use crate::queries::player_resolution::ensure_player_uuid;
use crate::{AppError, AppState};

pub async fn get_player_advancements(
    state: &AppState,
    request: PlayerRecordsRequest,
) -> Result<PlayerAdvancementsResponse, AppError> {
    let selector = PlayerSelector::new(request.player_uuid, request.player_name);
    let keys = FilterKeys::from_raw(request.keys);
    let page = PageRequest::new(request.page, request.page_size, PageLimits::PLAYER_RECORDS);
    let player_uuid = ensure_player_uuid(state, &selector)
        .await?
        .ok_or(AppError::NotFound)?;

    let total = state
        .player_records
        .count_advancements(&player_uuid, keys.as_ref())
        .await
        .map_err(database("count player advancements"))?;
    let window = page.window(total);
    let entries = state
        .player_records
        .fetch_advancements(&player_uuid, keys.as_ref(), window)
        .await
        .map_err(database("load player advancements"))?;

    Ok(PlayerAdvancementsResponse {
        player_uuid,
        advancements: entries
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect(),
        total,
        page: window.page,
        page_size: window.limit,
    })
}

pub async fn get_player_stats(
    state: &AppState,
    request: PlayerRecordsRequest,
) -> Result<PlayerStatsResponse, AppError> {
    let selector = PlayerSelector::new(request.player_uuid, request.player_name);
    let keys = FilterKeys::from_raw(request.keys);
    let page = PageRequest::new(request.page, request.page_size, PageLimits::PLAYER_RECORDS);
    let player_uuid = ensure_player_uuid(state, &selector)
        .await?
        .ok_or(AppError::NotFound)?;

    let total = state
        .player_records
        .count_stats(&player_uuid, keys.as_ref())
        .await
        .map_err(database("count player stats"))?;
    let window = page.window(total);
    let entries = state
        .player_records
        .fetch_stats(&player_uuid, keys.as_ref(), window)
        .await
        .map_err(database("load player stats"))?;

    Ok(PlayerStatsResponse {
        player_uuid,
        stats: entries
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect(),
        total,
        page: window.page,
        page_size: window.limit,
    })
}
