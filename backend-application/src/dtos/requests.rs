use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecordsRequest {
    pub player_uuid: Option<String>,
    pub player_name: Option<String>,
    pub keys: Option<Vec<String>>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLookupRequest {
    pub player_uuid: Option<String>,
    pub player_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogQueryRequest {
    pub player_uuid: Option<String>,
    pub player_name: Option<String>,
    pub single_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub dimension_context: Option<String>,
    pub entry_id: Option<String>,
    pub change_type: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub order: Option<String>,
    pub order_column: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogDetailRequest {
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQueryRequest {
    pub player_uuid: Option<String>,
    pub player_name: Option<String>,
    pub event_type: Option<String>,
    pub single_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOnlyRequest {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayersDataRequest {
    pub player_uuids: Option<Vec<String>>,
    pub player_names: Option<Vec<String>>,
    pub stat_keys: Option<Vec<String>>,
    pub advancement_keys: Option<Vec<String>>,
    pub include_balance: Option<bool>,
    pub include_balance_all: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteSqlRequest {
    pub sql: Option<String>,
    pub max_rows: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRequest {
    pub player_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceUpdateRequest {
    pub player_name: Option<String>,
    #[serde(default)]
    pub amount: i64,
}
