use backend_domain::ServerTime;

use crate::dtos::{OnlinePlayersResponse, StatusResponse};
use crate::error::{database, internal};
use crate::{AppError, AppState};

pub async fn list_online_players(state: &AppState) -> Result<OnlinePlayersResponse, AppError> {
    let players = state
        .host
        .online_players()
        .await
        .map_err(internal("list online players"))?;
    Ok(OnlinePlayersResponse { players })
}

pub async fn get_server_time(state: &AppState) -> Result<ServerTime, AppError> {
    state
        .host
        .server_time()
        .await
        .map_err(internal("read server time"))
}

pub async fn get_status(state: &AppState) -> Result<StatusResponse, AppError> {
    let basics = state
        .host
        .server_basics()
        .await
        .map_err(internal("read server basics"))?;
    let totals = state
        .player_records
        .data_totals()
        .await
        .map_err(database("load data totals"))?;
    Ok(StatusResponse {
        interval_time_ticks: state.config.interval_time_ticks,
        interval_time_seconds: state.config.interval_time_seconds(),
        server_max_players: basics.server_max_players,
        online_player_count: basics.online_player_count,
        mtr_logs_total: totals.mtr_logs_total,
        stats_total: totals.stats_total,
        advancements_total: totals.advancements_total,
    })
}
