//! Degraded-mode integration tests: the store is unreachable, the gateway
//! keeps serving. No database required.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use gatehouse_api::config::ApiConfig;
use gatehouse_api::{AppState, router};
use gatehouse_core::auth::remember_tokens::TokenLedger;
use gatehouse_core::auth::session::SessionBridge;
use gatehouse_core::db::{Store, StoreConfig};
use tower::ServiceExt;

fn degraded_app() -> Router {
    // Nothing listens on port 9; every pool acquire fails fast.
    let mut store_config = StoreConfig::new("postgres://127.0.0.1:9/unreachable");
    store_config.acquire_timeout = Duration::from_secs(1);
    let store = Store::connect(&store_config).expect("lazy store");

    let config = ApiConfig::default();
    let ledger = TokenLedger::new(store.clone());
    let bridge = SessionBridge::new(ledger, config.remember_days);

    router(AppState {
        store,
        bridge,
        config,
    })
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

#[tokio::test]
async fn health_reports_disconnected_store_with_200() {
    let resp = degraded_app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["dbConnected"], false);
}

#[tokio::test]
async fn session_read_without_cookie_is_anonymous() {
    let resp = degraded_app()
        .oneshot(
            Request::builder()
                .uri("/auth/sessions/current")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["authenticated"], false);
}

#[tokio::test]
async fn session_read_with_cookie_degrades_to_anonymous_when_store_is_down() {
    let resp = degraded_app()
        .oneshot(
            Request::builder()
                .uri("/auth/sessions/current")
                .header(header::COOKIE, "gatehouse_remember=some-token-value")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request");

    // A storage outage is never a user-facing error on this path.
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["authenticated"], false);
}

#[tokio::test]
async fn login_succeeds_with_persistence_skipped_when_store_is_down() {
    let body = serde_json::json!({
        "provider": "google",
        "profile": {"sub": "12345", "name": "Degraded User", "email": "d@example.com"},
        "remember": true
    });

    let resp = degraded_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/sessions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("request");

    // Authentication must never fail because the optional remember-me
    // write failed.
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    let json = body_json(resp).await;
    assert_eq!(json["authenticated"], true);
    assert_eq!(json["remembered"], false);
    assert_eq!(json["principal"]["externalId"], "12345");
}

#[tokio::test]
async fn unknown_provider_is_rejected_before_storage() {
    let body = serde_json::json!({
        "provider": "myspace",
        "profile": {"sub": "1"},
        "remember": false
    });

    let resp = degraded_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/sessions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn profile_without_subject_is_rejected() {
    let body = serde_json::json!({
        "provider": "google",
        "profile": {"name": "No Subject"},
        "remember": true
    });

    let resp = degraded_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/sessions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_always_succeeds_and_clears_the_cookie() {
    let resp = degraded_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/auth/sessions/current")
                .header(header::COOKIE, "gatehouse_remember=whatever")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("clearing cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("gatehouse_remember="));
    assert!(set_cookie.contains("Max-Age=0"));

    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
}
