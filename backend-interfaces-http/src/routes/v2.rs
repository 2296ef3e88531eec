use axum::Router;

use backend_application::AppState;

use crate::handlers::{ingest_handlers, ops_handlers, rpc_handlers, ws_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v2/rpc", axum::routing::post(rpc_handlers::rpc))
        .route("/v2/ws", axum::routing::get(ws_handlers::rpc_socket))
        .route(
            "/v2/ingest/host",
            axum::routing::post(ingest_handlers::ingest_host),
        )
        .route(
            "/v2/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v2/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v2/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestServer;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn ingest(token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/v2/ingest/host")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn rpc_errors_still_answer_200() {
        let server = TestServer::start().await;
        let response = build_router(server.state.clone())
            .oneshot(post("/v2/rpc", json!({"event": "get_status", "key": "wrong"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"success": false, "error": "INVALID_KEY"})
        );
    }

    #[tokio::test]
    async fn ingested_join_shows_up_online_and_in_sessions() {
        let server = TestServer::start().await;
        let router = build_router(server.state.clone());

        let batch = json!({"events": [
            {"kind": "snapshot", "max_players": 30, "worlds": [
                {"world": "world", "time": 6000, "full_time": 30000, "do_daylight_cycle": "true"}
            ]},
            {"kind": "session", "event_type": "JOIN", "player_uuid": "u-1",
             "player_name": "Alex", "world_name": "world", "occurred_at": 1714521600000_i64}
        ]});
        let response = router
            .clone()
            .oneshot(ingest(Some("secret"), batch))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"accepted": 2}));

        let online = json_body(
            router
                .clone()
                .oneshot(post(
                    "/v2/rpc",
                    json!({"event": "list_online_players", "key": "secret"}),
                ))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(online["players"][0]["uuid"], "u-1");
        assert_eq!(online["players"][0]["name"], "Alex");

        let sessions = json_body(
            router
                .clone()
                .oneshot(post(
                    "/v2/rpc",
                    json!({"event": "get_player_sessions", "key": "secret", "playerUuid": "u-1"}),
                ))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(sessions["success"], true);
        assert_eq!(sessions["total"], 1);
        assert_eq!(sessions["records"][0]["event_type"], "JOIN");

        let time = json_body(
            router
                .oneshot(post("/v2/rpc", json!({"event": "get_server_time", "key": "secret"})))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(time["world"], "world");
        assert_eq!(time["time"], 6000);
    }

    #[tokio::test]
    async fn balance_write_is_handed_back_to_the_host() {
        let server = TestServer::start().await;
        let router = build_router(server.state.clone());
        let snapshot = json!({"events": [
            {"kind": "snapshot", "balances": [{"player": "Steve", "balance": 100}]}
        ]});

        router
            .clone()
            .oneshot(ingest(Some("secret"), snapshot.clone()))
            .await
            .unwrap();
        let set = json_body(
            router
                .clone()
                .oneshot(post(
                    "/v2/rpc",
                    json!({"event": "set_player_balance", "key": "secret",
                           "playerName": "Steve", "amount": 5}),
                ))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(set["balance"], 5);

        // The host pushes a snapshot taken before it saw the write.
        let ack = json_body(
            router
                .clone()
                .oneshot(ingest(Some("secret"), snapshot))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(
            ack,
            json!({"accepted": 1, "balance_writes": [{"player": "Steve", "balance": 5}]})
        );

        let balance = json_body(
            router
                .oneshot(post(
                    "/v2/rpc",
                    json!({"event": "get_player_balance", "key": "secret", "playerName": "Steve"}),
                ))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(balance["balance"], 5);
    }

    #[tokio::test]
    async fn ingest_requires_bearer_and_valid_body() {
        let server = TestServer::start().await;
        let router = build_router(server.state.clone());

        let response = router
            .clone()
            .oneshot(ingest(None, json!({"events": []})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = router
            .oneshot(ingest(Some("secret"), json!({"events": [{"kind": "teleport"}]})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn ops_routes_report_health_and_metrics() {
        let server = TestServer::start().await;
        let router = build_router(server.state.clone());

        let live = router
            .clone()
            .oneshot(Request::get("/v2/ops/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(live.status(), StatusCode::OK);

        let ready = router
            .clone()
            .oneshot(Request::get("/v2/ops/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ready.status(), StatusCode::OK);

        let denied = router
            .clone()
            .oneshot(
                Request::get("/v2/ops/metrics/prometheus")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

        let metrics = router
            .oneshot(
                Request::get("/v2/ops/metrics/prometheus")
                    .header(header::AUTHORIZATION, "Bearer secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(metrics.status(), StatusCode::OK);
        assert_eq!(
            metrics.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4; charset=utf-8"
        );
        let text = to_bytes(metrics.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&text).contains("beacon_rpc_requests_total 0"));
    }

    #[tokio::test]
    async fn ready_fails_once_the_store_is_closed() {
        let server = TestServer::start().await;
        server.store.close().await;
        let ready = build_router(server.state.clone())
            .oneshot(Request::get("/v2/ops/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
