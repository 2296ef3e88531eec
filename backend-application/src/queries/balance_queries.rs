use backend_domain::BalanceEntry;

use crate::commands::balance_commands::{missing_objective, require_player_name};
use crate::dtos::BalanceRequest;
use crate::error::internal;
use crate::{AppError, AppState};

pub async fn get_player_balance(
    state: &AppState,
    request: BalanceRequest,
) -> Result<BalanceEntry, AppError> {
    let player = require_player_name(request.player_name)?;
    let balance = state
        .host
        .balance(&player)
        .await
        .map_err(internal("read player balance"))?
        .ok_or_else(missing_objective)?;
    Ok(BalanceEntry { player, balance })
}
