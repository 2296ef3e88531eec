use backend_domain::{normalize_optional_text, BalanceEntry, BALANCE_OBJECTIVE};

use crate::dtos::BalanceUpdateRequest;
use crate::error::internal;
use crate::{AppError, AppState};

pub async fn set_player_balance(
    state: &AppState,
    request: BalanceUpdateRequest,
) -> Result<BalanceEntry, AppError> {
    let player = require_player_name(request.player_name)?;
    let balance = state
        .host
        .set_balance(&player, request.amount)
        .await
        .map_err(internal("set player balance"))?
        .ok_or_else(missing_objective)?;
    Ok(BalanceEntry { player, balance })
}

pub async fn add_player_balance(
    state: &AppState,
    request: BalanceUpdateRequest,
) -> Result<BalanceEntry, AppError> {
    let player = require_player_name(request.player_name)?;
    let balance = state
        .host
        .add_balance(&player, request.amount)
        .await
        .map_err(internal("add player balance"))?
        .ok_or_else(missing_objective)?;
    Ok(BalanceEntry { player, balance })
}

pub(crate) fn require_player_name(raw: Option<String>) -> Result<String, AppError> {
    normalize_optional_text(raw).ok_or_else(|| AppError::invalid("playerName is required"))
}

pub(crate) fn missing_objective() -> AppError {
    AppError::invalid(format!("objective {} not found", BALANCE_OBJECTIVE))
}
