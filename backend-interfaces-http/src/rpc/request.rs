use serde::Deserialize;

use backend_application::dtos::{
    BalanceRequest, BalanceUpdateRequest, ChangeLogDetailRequest, ChangeLogQueryRequest,
    ExecuteSqlRequest, PageOnlyRequest, PlayerLookupRequest, PlayerRecordsRequest,
    PlayersDataRequest, SessionQueryRequest,
};

/// Every request kind the RPC surface accepts, selected by the `event` field.
/// Unknown fields such as `key` and `requestId` are ignored here.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RpcRequest {
    ForceUpdate,
    GetPlayerAdvancements(PlayerRecordsRequest),
    GetPlayerStats(PlayerRecordsRequest),
    ListOnlinePlayers,
    GetServerTime,
    GetStatus,
    GetPlayerMtrLogs(ChangeLogQueryRequest),
    GetMtrLogDetail(ChangeLogDetailRequest),
    GetPlayerSessions(SessionQueryRequest),
    LookupPlayerIdentity(PlayerLookupRequest),
    ListPlayerIdentities(PageOnlyRequest),
    GetPlayerNbt(PlayerLookupRequest),
    GetPlayersData(PlayersDataRequest),
    ExecuteSql(ExecuteSqlRequest),
    GetPlayerBalance(BalanceRequest),
    SetPlayerBalance(BalanceUpdateRequest),
    AddPlayerBalance(BalanceUpdateRequest),
}

impl RpcRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            RpcRequest::ForceUpdate => "force_update",
            RpcRequest::GetPlayerAdvancements(_) => "get_player_advancements",
            RpcRequest::GetPlayerStats(_) => "get_player_stats",
            RpcRequest::ListOnlinePlayers => "list_online_players",
            RpcRequest::GetServerTime => "get_server_time",
            RpcRequest::GetStatus => "get_status",
            RpcRequest::GetPlayerMtrLogs(_) => "get_player_mtr_logs",
            RpcRequest::GetMtrLogDetail(_) => "get_mtr_log_detail",
            RpcRequest::GetPlayerSessions(_) => "get_player_sessions",
            RpcRequest::LookupPlayerIdentity(_) => "lookup_player_identity",
            RpcRequest::ListPlayerIdentities(_) => "list_player_identities",
            RpcRequest::GetPlayerNbt(_) => "get_player_nbt",
            RpcRequest::GetPlayersData(_) => "get_players_data",
            RpcRequest::ExecuteSql(_) => "execute_sql",
            RpcRequest::GetPlayerBalance(_) => "get_player_balance",
            RpcRequest::SetPlayerBalance(_) => "set_player_balance",
            RpcRequest::AddPlayerBalance(_) => "add_player_balance",
        }
    }
}
