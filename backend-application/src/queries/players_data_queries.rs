use std::collections::BTreeSet;

use backend_domain::{normalize_optional_text, BalanceEntry, FilterKeys};

use crate::commands::balance_commands::missing_objective;
use crate::dtos::{PlayersDataRequest, PlayersDataResponse};
use crate::error::{database, internal};
use crate::queries::player_resolution::resolve_uuid_by_name;
use crate::{AppError, AppState};

pub const MAX_PLAYERS_PER_REQUEST: usize = 200;

/// Batch read of balances, stats and advancements across players.
/// Names that do not resolve to a uuid are dropped silently.
pub async fn get_players_data(
    state: &AppState,
    request: PlayersDataRequest,
) -> Result<PlayersDataResponse, AppError> {
    let names = trimmed(request.player_names);
    let mut player_uuids: BTreeSet<String> = trimmed(request.player_uuids).into_iter().collect();
    for name in &names {
        if let Some(uuid) = resolve_uuid_by_name(state, name).await? {
            player_uuids.insert(uuid);
        }
    }
    if player_uuids.len() > MAX_PLAYERS_PER_REQUEST {
        return Err(AppError::invalid(format!(
            "Too many players; max {} per request",
            MAX_PLAYERS_PER_REQUEST
        )));
    }

    let stat_keys = FilterKeys::from_raw(request.stat_keys);
    let advancement_keys = FilterKeys::from_raw(request.advancement_keys);
    if (stat_keys.is_some() || advancement_keys.is_some()) && player_uuids.is_empty() {
        return Err(AppError::invalid(
            "playerUuids/playerNames required when requesting stats or advancements",
        ));
    }

    let include_balance = request.include_balance.unwrap_or(false);
    let include_balance_all = request.include_balance_all.unwrap_or(false);

    let mut response = PlayersDataResponse::default();
    if include_balance_all {
        let balances = state
            .host
            .list_balances()
            .await
            .map_err(internal("list balances"))?
            .ok_or_else(missing_objective)?;
        response.balances = Some(balances);
    } else if include_balance {
        let balance_names = if names.is_empty() {
            names_for_uuids(state, &player_uuids).await?
        } else {
            names.clone()
        };
        if balance_names.is_empty() {
            return Err(AppError::invalid(
                "playerNames or playerUuids required when includeBalance is true",
            ));
        }
        let mut balances = Vec::with_capacity(balance_names.len());
        for player in balance_names {
            let balance = state
                .host
                .balance(&player)
                .await
                .map_err(internal("read player balance"))?
                .ok_or_else(missing_objective)?;
            balances.push(BalanceEntry { player, balance });
        }
        response.balances = Some(balances);
    }

    if let Some(keys) = &stat_keys {
        let stats = state
            .player_records
            .stats_for_players(&player_uuids, keys)
            .await
            .map_err(database("load stats for players"))?;
        response.stats = Some(stats);
    }
    if let Some(keys) = &advancement_keys {
        let advancements = state
            .player_records
            .advancements_for_players(&player_uuids, keys)
            .await
            .map_err(database("load advancements for players"))?;
        response.advancements = Some(advancements);
    }

    Ok(response)
}

fn trimmed(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| normalize_optional_text(Some(value)))
        .collect()
}

async fn names_for_uuids(
    state: &AppState,
    player_uuids: &BTreeSet<String>,
) -> Result<Vec<String>, AppError> {
    let mut names = Vec::new();
    for uuid in player_uuids {
        let identity = state
            .identities
            .find_identity_by_uuid(uuid)
            .await
            .map_err(database("load identity by uuid"))?;
        if let Some(name) = identity.and_then(|identity| identity.player_name) {
            if !name.is_empty() {
                names.push(name);
            }
        }
    }
    Ok(names)
}
