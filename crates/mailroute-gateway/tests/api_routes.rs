#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use mailroute_gateway::{app_state::AppState, config, router, store::InMemoryConfigStore};

const TOKEN: &str = "s3cret";

fn app_with(store: InMemoryConfigStore, token: Option<&str>) -> Router {
    let cfg = config::load_from_str("version: 1\n").unwrap();
    let state = AppState::with_store(cfg, Arc::new(store), token.map(str::to_string));
    router::build_router(state)
}

fn app(routes: &[(&str, &str)]) -> Router {
    let store = InMemoryConfigStore::new();
    for (k, v) in routes {
        store.insert(*k, *v);
    }
    app_with(store, Some(TOKEN))
}

fn request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn missing_or_wrong_token_is_unauthorized() {
    let app = app(&[]);
    let no_header = Request::builder()
        .uri("/api/email/list")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, no_header).await, (StatusCode::UNAUTHORIZED, "Unauthorized".into()));

    let wrong = Request::builder()
        .uri("/api/email/list")
        .header(header::AUTHORIZATION, "Bearer nope")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, wrong).await.0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn no_configured_token_refuses_everything() {
    let app = app_with(InMemoryConfigStore::new(), None);
    let (status, _) = send(&app, request(Method::GET, "/api/email/list", "")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn put_get_delete_cycle() {
    let app = app(&[]);

    let (status, body) = send(
        &app,
        request(Method::PUT, "/api/email/inbox%40site.com", r#"{ "forward_to": "ops@dest.com" }"#),
    )
    .await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "Saved"));

    let (status, body) = send(&app, request(Method::GET, "/api/email/inbox@site.com/", "")).await;
    assert_eq!(status, StatusCode::OK);
    let doc: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(doc["forward_to"], json!("ops@dest.com"));
    assert_eq!(doc["enabled"], json!(true));
    assert_eq!(doc["allow"], json!({ "domains": [], "emails": [] }));

    let (status, body) = send(&app, request(Method::DELETE, "/api/email/inbox@site.com", "")).await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "Deleted"));

    let (status, body) = send(&app, request(Method::GET, "/api/email/inbox@site.com", "")).await;
    assert_eq!((status, body.as_str()), (StatusCode::NOT_FOUND, "Not found"));
}

#[tokio::test]
async fn put_rejects_invalid_json() {
    let app = app(&[]);
    let (status, body) = send(&app, request(Method::PUT, "/api/email/inbox@site.com", "{nope")).await;
    assert_eq!((status, body.as_str()), (StatusCode::BAD_REQUEST, "Invalid JSON"));
}

#[tokio::test]
async fn list_returns_merged_or_raw() {
    let app = app(&[
        ("a@site.com", r#"{"enabled":false}"#),
        ("b@site.com", "{broken"),
    ]);
    let (status, body) = send(&app, request(Method::GET, "/api/email/list", "")).await;
    assert_eq!(status, StatusCode::OK);

    let list: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(list[0]["email"], json!("a@site.com"));
    assert_eq!(list[0]["config"]["enabled"], json!(false));
    assert_eq!(list[0]["config"]["logging"]["log_subject"], json!(true));
    assert_eq!(list[1]["email"], json!("b@site.com"));
    assert_eq!(list[1]["config"], json!("{broken"));
}

#[tokio::test]
async fn unsupported_method_and_unknown_path() {
    let app = app(&[]);
    let (status, _) = send(&app, request(Method::POST, "/api/email/list", "")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, body) = send(&app, request(Method::GET, "/nowhere", "")).await;
    assert_eq!((status, body.as_str()), (StatusCode::NOT_FOUND, "Not found"));
}

#[tokio::test]
async fn route_endpoint_returns_decision() {
    let app = app(&[(
        "inbox@site.com",
        r#"{"enabled":true,"allow":{"domains":["example.com"]},"forward_to":"ops@dest.com"}"#,
    )]);

    let (status, body) = send(
        &app,
        request(Method::POST, "/v1/route", r#"{"from":"a@example.com","to":"inbox@site.com","subject":""}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "action": "forward", "forward_to": ["ops@dest.com"] })
    );

    let (_, body) = send(
        &app,
        request(Method::POST, "/v1/route", r#"{"from":"a@other.com","to":"inbox@site.com"}"#),
    )
    .await;
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "action": "reject", "reason": "Sender not allowed" })
    );

    let (_, body) = send(
        &app,
        request(Method::POST, "/v1/route", r#"{"from":"a@other.com","to":"unknown@site.com"}"#),
    )
    .await;
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "action": "reject", "reason": "No route defined" })
    );
}

#[tokio::test]
async fn route_endpoint_rejects_bad_envelope() {
    let app = app(&[]);
    let (status, _) = send(&app, request(Method::POST, "/v1/route", r#"{"to":"x@y.com"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ops_endpoints() {
    let app = app(&[("inbox@site.com", r#"{"forward_to":["x@y.com"]}"#)]);
    send(
        &app,
        request(Method::POST, "/v1/route", r#"{"from":"a@b.com","to":"inbox@site.com"}"#),
    )
    .await;

    let health = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    assert_eq!(send(&app, health).await, (StatusCode::OK, "ok".into()));

    let metrics = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let (status, body) = send(&app, metrics).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"mailroute_route_decisions_total{outcome="forward",reason=""} 1"#));
    assert!(body.contains("mailroute_route_duration_micros_count"));
}

#[tokio::test]
async fn auth_is_checked_before_method_routing() {
    let app = app(&[]);
    let unauthenticated = Request::builder()
        .method(Method::POST)
        .uri("/api/email/inbox@site.com")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, unauthenticated).await, (StatusCode::UNAUTHORIZED, "Unauthorized".into()));

    let (status, _) = send(&app, request(Method::POST, "/api/email/inbox@site.com", "")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn get_shows_malformed_filters_as_stored() {
    let app = app(&[]);
    let stored = r#"{"filtering":[{"pattern":42,"action":"reject","note":"keep me"}]}"#;
    let (status, _) = send(&app, request(Method::PUT, "/api/email/inbox@site.com", stored)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, request(Method::GET, "/api/email/inbox@site.com", "")).await;
    let doc: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        doc["filtering"],
        json!([{ "pattern": 42, "action": "reject", "note": "keep me" }])
    );

    // write the merged view back and read it again: nothing lost
    send(&app, request(Method::PUT, "/api/email/inbox@site.com", &body)).await;
    let (_, again) = send(&app, request(Method::GET, "/api/email/inbox@site.com", "")).await;
    assert_eq!(serde_json::from_str::<Value>(&again).unwrap(), doc);
}
