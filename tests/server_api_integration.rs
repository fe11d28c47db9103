//! Integration tests for the overlay server HTTP surface
//!
//! Requests go through the full router, middleware included, via
//! `tower::ServiceExt::oneshot`.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{names_event, ROSTER_JSON};
use http_body_util::BodyExt;
use serde_json::Value;
use server::{build_router, ServerConfig, ServerState};
use tower::ServiceExt;

fn test_state() -> Arc<ServerState> {
    let config = ServerConfig {
        metrics_enabled: false,
        ..ServerConfig::default()
    };
    Arc::new(ServerState::new(config).expect("state"))
}

fn loaded_state() -> Arc<ServerState> {
    let state = test_state();
    state.roster.replace_json(ROSTER_JSON).expect("fixture roster");
    state
}

async fn send(state: &Arc<ServerState>, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = build_router(Arc::clone(state)).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn open_stream(state: &Arc<ServerState>, uri: &str) -> Body {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = build_router(Arc::clone(state)).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/event-stream"
    );
    response.into_body()
}

/// Read stream frames until one contains `needle`.
async fn read_until(body: &mut Body, needle: &str) -> String {
    let mut seen = String::new();
    tokio::time::timeout(Duration::from_secs(5), async {
        while !seen.contains(needle) {
            let frame = body.frame().await.expect("stream ended").unwrap();
            if let Ok(data) = frame.into_data() {
                seen.push_str(&String::from_utf8_lossy(&data));
            }
        }
    })
    .await
    .expect("timed out waiting for stream data");
    seen
}

#[tokio::test]
async fn test_api_info() {
    let (status, body) = send(&test_state(), Method::GET, "/", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Overlay Server");
    assert!(body["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e == "/api/overlay/stream"));
}

#[tokio::test]
async fn test_health_and_readiness() {
    let state = test_state();
    let (status, body) = send(&state, Method::GET, "/health", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&state, Method::GET, "/ready", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["components"]["roster"], "empty");
    assert_eq!(body["index"]["generation"], 0);

    state.roster.replace_json(ROSTER_JSON).unwrap();
    let (_, body) = send(&state, Method::GET, "/ready", "").await;
    assert_eq!(body["components"]["roster"], "ready");
    assert_eq!(body["index"]["entries"], 4);
    assert_eq!(body["index"]["stats"]["players_without_image"], 1);
}

#[tokio::test]
async fn test_metrics_disabled_is_not_found() {
    let (status, body) = send(&test_state(), Method::GET, "/metrics", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_put_and_get_teams() {
    let state = test_state();
    let (status, body) = send(&state, Method::PUT, "/api/teams", ROSTER_JSON).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["generation"], 1);
    assert_eq!(body["stats"]["entries"], 4);

    let (status, body) = send(&state, Method::GET, "/api/teams", "").await;
    assert_eq!(status, StatusCode::OK);
    let teams = body.as_array().unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0]["teamName"], "Falcons");
    assert_eq!(teams[1]["players"][1]["playerName"], "B0lt");
}

#[tokio::test]
async fn test_invalid_roster_keeps_previous_index() {
    let state = loaded_state();
    let duplicate_slot = r#"[
        {"id":"a","teamName":"A","slotNumber":3,"players":[]},
        {"id":"b","teamName":"B","slotNumber":3,"players":[]}
    ]"#;

    let (status, body) = send(&state, Method::PUT, "/api/teams", duplicate_slot).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_ROSTER");

    let (status, _) = send(&state, Method::PUT, "/api/teams", "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(state.roster.generation(), 1);
    assert_eq!(state.roster.index().len(), 4);
}

#[tokio::test]
async fn test_push_event_without_clients() {
    let state = test_state();
    let (status, body) =
        send(&state, Method::POST, "/api/ocr-stream", &names_event(&["Shadow"])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["clients"], 0);
    assert_eq!(body["delivered"], 0);

    let (status, body) = send(&state, Method::POST, "/api/ocr-stream", "{oops").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_match_preview() {
    let state = loaded_state();
    let (status, body) = send(
        &state,
        Method::POST,
        "/api/match",
        r#"{"raw_text":["SHAD0W","zz"]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokens"], serde_json::json!(["shaqow"]));
    assert_eq!(body["candidate"]["playerName"], "Shadow");
    assert_eq!(body["decision"]["status"], "matched");
    assert_eq!(body["decision"]["match"]["teamName"], "Falcons");
    assert_eq!(body["generation"], 1);
}

#[tokio::test]
async fn test_match_preview_rejects_malformed_event() {
    let state = loaded_state();
    let (status, body) = send(&state, Method::POST, "/api/match", r#"{"raw_text":7}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MALFORMED_EVENT");
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = send(&test_state(), Method::GET, "/api/nope", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_raw_stream_relays_pushed_events() {
    let state = test_state();
    let mut body = open_stream(&state, "/api/ocr-stream").await;
    assert_eq!(state.relay.client_count(), 1);

    let (_, report) = send(
        &state,
        Method::POST,
        "/api/ocr-stream",
        r#"{ "raw_text": ["V0RTEX"] }"#,
    )
    .await;
    assert_eq!(report["clients"], 1);
    assert_eq!(report["delivered"], 1);

    let seen = read_until(&mut body, "V0RTEX").await;
    assert!(seen.contains(r#"data: {"raw_text":["V0RTEX"]}"#));

    drop(body);
    assert_eq!(state.relay.client_count(), 0);
}

#[tokio::test]
async fn test_overlay_stream_emits_decisions() {
    let state = loaded_state();
    let mut body = open_stream(&state, "/api/overlay/stream").await;

    state.relay.publish(Arc::from("not json"));
    state.relay.publish(Arc::from(names_event(&["shad0w"])));

    let seen = read_until(&mut body, "Shadow").await;
    assert!(seen.contains("event: decision"));
    assert!(seen.contains(r#""status":"matched""#));
    assert!(seen.contains(r#""playerName":"Shadow""#));
    assert!(seen.contains(r#""generation":1"#));
    assert!(seen.contains("PlayerImgTop"));
}
