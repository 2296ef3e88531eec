use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tracing::{debug, warn};

use backend_application::AppState;

use crate::rpc::dispatch;

pub async fn rpc_socket(State(state): State<AppState>, upgrade: WebSocketUpgrade) -> Response {
    upgrade.on_upgrade(move |socket| serve_socket(state, socket))
}

async fn serve_socket(state: AppState, mut ws: WebSocket) {
    debug!("rpc socket opened");
    while let Some(next) = ws.next().await {
        match next {
            Ok(Message::Text(text)) => {
                let reply = reply_to_frame(&state, &text).await;
                if let Err(err) = ws.send(Message::Text(reply.to_string())).await {
                    warn!("rpc socket send failed: {}", err);
                    break;
                }
            }
            Ok(Message::Ping(bytes)) => {
                if ws.send(Message::Pong(bytes)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(frame)) => {
                debug!("rpc socket closed by peer: {:?}", frame);
                break;
            }
            Ok(_) => {}
            Err(err) => {
                warn!("rpc socket stream error: {}", err);
                break;
            }
        }
    }
}

/// Same envelope as `POST /v2/rpc`, plus the caller's `requestId` when one was sent.
pub async fn reply_to_frame(state: &AppState, text: &str) -> Value {
    let payload: Value = serde_json::from_str(text).unwrap_or(Value::Null);
    let request_id = payload.get("requestId").cloned();
    let mut reply = dispatch(state, payload).await;
    if let (Some(request_id), Some(fields)) = (request_id, reply.as_object_mut()) {
        fields.insert("requestId".to_string(), request_id);
    }
    reply
}
