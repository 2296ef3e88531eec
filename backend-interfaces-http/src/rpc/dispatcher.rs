use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use backend_application::commands::{add_player_balance, force_update, set_player_balance};
use backend_application::queries::{
    execute_sql, get_mtr_log_detail, get_player_advancements, get_player_balance,
    get_player_mtr_logs, get_player_nbt, get_player_sessions, get_player_stats, get_players_data,
    get_server_time, get_status, list_online_players, list_player_identities,
    lookup_player_identity,
};
use backend_application::{AppError, AppState};

use crate::middleware::key_matches;
use crate::rpc::RpcRequest;

/// Decodes one raw frame and answers it. Anything that is not a JSON object with a valid key
/// is rejected as `INVALID_KEY`.
pub async fn dispatch_frame(state: &AppState, raw: &[u8]) -> Value {
    let payload = serde_json::from_slice(raw).unwrap_or(Value::Null);
    dispatch(state, payload).await
}

/// Authenticates, decodes and routes one request, always producing an envelope.
pub async fn dispatch(state: &AppState, payload: Value) -> Value {
    state.metrics.record_request();
    match handle(state, payload).await {
        Ok(body) => success(body),
        Err(err) => {
            state.metrics.record_request_error();
            debug!(code = err.code(), "rpc request failed: {}", err);
            failure(&err)
        }
    }
}

fn authenticate(state: &AppState, payload: &Value) -> Result<(), AppError> {
    let provided = payload.get("key").and_then(Value::as_str);
    if key_matches(&state.config.key, provided) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

async fn handle(state: &AppState, payload: Value) -> Result<Value, AppError> {
    authenticate(state, &payload)?;
    let request: RpcRequest =
        serde_json::from_value(payload).map_err(|err| AppError::invalid(err.to_string()))?;
    debug!(event = request.kind(), "rpc request");

    match request {
        RpcRequest::ForceUpdate => body(force_update(state)),
        RpcRequest::GetPlayerAdvancements(req) => body(get_player_advancements(state, req).await?),
        RpcRequest::GetPlayerStats(req) => body(get_player_stats(state, req).await?),
        RpcRequest::ListOnlinePlayers => body(list_online_players(state).await?),
        RpcRequest::GetServerTime => body(get_server_time(state).await?),
        RpcRequest::GetStatus => body(get_status(state).await?),
        RpcRequest::GetPlayerMtrLogs(req) => body(get_player_mtr_logs(state, req).await?),
        RpcRequest::GetMtrLogDetail(req) => body(get_mtr_log_detail(state, req).await?),
        RpcRequest::GetPlayerSessions(req) => body(get_player_sessions(state, req).await?),
        RpcRequest::LookupPlayerIdentity(req) => body(lookup_player_identity(state, req).await?),
        RpcRequest::ListPlayerIdentities(req) => body(list_player_identities(state, req).await?),
        RpcRequest::GetPlayerNbt(req) => body(get_player_nbt(state, req).await?),
        RpcRequest::GetPlayersData(req) => body(get_players_data(state, req).await?),
        RpcRequest::ExecuteSql(req) => body(execute_sql(state, req).await?),
        RpcRequest::GetPlayerBalance(req) => body(get_player_balance(state, req).await?),
        RpcRequest::SetPlayerBalance(req) => body(set_player_balance(state, req).await?),
        RpcRequest::AddPlayerBalance(req) => body(add_player_balance(state, req).await?),
    }
}

fn body<T: Serialize>(value: T) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|err| AppError::Internal(err.into()))
}

fn success(body: Value) -> Value {
    let mut envelope = match body {
        Value::Object(fields) => fields,
        other => {
            let mut fields = Map::new();
            fields.insert("data".to_string(), other);
            fields
        }
    };
    envelope.insert("success".to_string(), Value::Bool(true));
    Value::Object(envelope)
}

fn failure(err: &AppError) -> Value {
    let mut envelope = Map::new();
    envelope.insert("success".to_string(), Value::Bool(false));
    envelope.insert("error".to_string(), Value::String(err.to_string()));
    Value::Object(envelope)
}
