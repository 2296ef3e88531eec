use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use backend_application::AppState;

use crate::rpc::dispatch_frame;

/// One request per POST. The reply is always HTTP 200 with an envelope body.
pub async fn rpc(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    Json(dispatch_frame(&state, &body).await)
}
