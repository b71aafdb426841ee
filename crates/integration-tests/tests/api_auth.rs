//! Registration, login and token-authenticated lookups.

use axum::http::StatusCode;
use integration_tests::{send, Harness};
use serde_json::json;

#[tokio::test]
async fn register_login_and_fetch_current_user() {
    let h = Harness::new();
    let app = h.router();
    let creds = json!({ "email": "viewer@example.com", "password": "secret1" });

    let registered = send(&app, "POST", "/api/register", Some(creds.clone()), None).await;
    assert_eq!(registered.status, StatusCode::OK);
    assert_eq!(registered.body["user"]["email"], "viewer@example.com");
    assert!(registered.body["user"].get("passwordHash").is_none());

    let logged_in = send(&app, "POST", "/api/login", Some(creds), None).await;
    assert_eq!(logged_in.status, StatusCode::OK);
    let token = logged_in.body["token"].as_str().unwrap().to_string();

    let me = send(&app, "GET", "/api/user", None, Some(token.as_str())).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["id"], registered.body["user"]["id"]);

    let bye = send(&app, "POST", "/api/logout", None, Some(token.as_str())).await;
    assert_eq!(bye.status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let h = Harness::new();
    let app = h.router();
    let creds = json!({ "email": "dup@example.com", "password": "secret1" });
    send(&app, "POST", "/api/register", Some(creds.clone()), None).await;

    let again = send(&app, "POST", "/api/register", Some(creds), None).await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.body["message"], "Email already registered");
}

#[tokio::test]
async fn short_password_is_rejected() {
    let h = Harness::new();
    let res = send(
        &h.router(),
        "POST",
        "/api/register",
        Some(json!({ "email": "a@example.com", "password": "123" })),
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_is_401() {
    let h = Harness::new();
    let app = h.router();
    send(
        &app,
        "POST",
        "/api/register",
        Some(json!({ "email": "b@example.com", "password": "secret1" })),
        None,
    )
    .await;

    let res = send(
        &app,
        "POST",
        "/api/login",
        Some(json!({ "email": "b@example.com", "password": "secret2" })),
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "Incorrect email or password");
}

#[tokio::test]
async fn current_user_requires_a_token() {
    let h = Harness::new();
    let app = h.router();
    assert_eq!(send(&app, "GET", "/api/user", None, None).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        send(&app, "GET", "/api/user", None, Some("forged")).await.status,
        StatusCode::UNAUTHORIZED
    );
}
