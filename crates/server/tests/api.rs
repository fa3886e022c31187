use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    for user in ["alice", "bob", "carol"] {
        engine.register_user(user, user).await.unwrap();
    }
    server::router(Arc::new(engine))
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let body = match body {
        Some(body) => {
            builder = builder.header("content-type", "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let res = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn new_wallet(app: &Router, user: &str) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/wallets",
        Some(user),
        Some(json!({ "name": "Home", "is_shared": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn requests_without_known_user_are_unauthorized() {
    let app = app().await;

    let (status, _) = call(&app, "GET", "/wallets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(&app, "GET", "/wallets", Some("mallory"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wallet_lifecycle() {
    let app = app().await;
    let wallet_id = new_wallet(&app, "alice").await;

    let (status, body) = call(&app, "GET", "/wallets", Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wallets"].as_array().unwrap().len(), 1);

    let (status, body) = call(&app, "GET", &format!("/wallets/{wallet_id}"), Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], "0.00");
    assert_eq!(body["members"][0]["role"], "OWNER");

    let (status, _) = call(&app, "GET", &format!("/wallets/{wallet_id}"), Some("bob"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(
        &app,
        "PATCH",
        &format!("/wallets/{wallet_id}"),
        Some("alice"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &app,
        "PATCH",
        &format!("/wallets/{wallet_id}"),
        Some("alice"),
        Some(json!({ "name": "Family" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Family");

    let (status, _) = call(&app, "DELETE", &format!("/wallets/{wallet_id}"), Some("alice"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, "GET", &format!("/wallets/{wallet_id}"), Some("alice"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_wallet_name_is_unprocessable() {
    let app = app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/wallets",
        Some("alice"),
        Some(json!({ "name": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("wallet name"));
}

#[tokio::test]
async fn invite_twice_conflicts() {
    let app = app().await;
    let wallet_id = new_wallet(&app, "alice").await;
    let uri = format!("/wallets/{wallet_id}/invite");

    let (status, body) = call(&app, "POST", &uri, Some("alice"), Some(json!({ "user_id": "bob" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "VIEWER");

    let (status, _) = call(&app, "POST", &uri, Some("alice"), Some(json!({ "user_id": "bob" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(&app, "POST", &uri, Some("alice"), Some(json!({ "user_id": "ghost" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "POST", &uri, Some("bob"), Some(json!({ "user_id": "carol" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn transactions_and_summary() {
    let app = app().await;
    let wallet_id = new_wallet(&app, "alice").await;

    let (status, _) = call(
        &app,
        "POST",
        "/transactions",
        Some("alice"),
        Some(json!({
            "wallet_id": wallet_id,
            "type": "EXPENSE",
            "category": "Food",
            "amount_minor": 0,
            "date": "2024-12-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = call(
        &app,
        "POST",
        "/transactions",
        Some("alice"),
        Some(json!({
            "wallet_id": wallet_id,
            "type": "INCOME",
            "category": "Salary",
            "amount_minor": 1_000_000_000_000_i64,
            "date": "2024-12-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("must not exceed"));

    let (status, body) = call(
        &app,
        "POST",
        "/transactions",
        Some("alice"),
        Some(json!({
            "wallet_id": wallet_id,
            "type": "INCOME",
            "category": " ",
            "amount_minor": 100,
            "date": "2024-12-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid category: category must not be empty");

    let (status, income) = call(
        &app,
        "POST",
        "/transactions",
        Some("alice"),
        Some(json!({
            "wallet_id": wallet_id,
            "type": "INCOME",
            "category": "Salary",
            "amount_minor": 10000,
            "date": "2024-12-05",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(income["amount"], "100.00");
    assert_eq!(income["created_by_id"], "alice");

    let (status, _) = call(
        &app,
        "POST",
        "/transactions",
        Some("alice"),
        Some(json!({
            "wallet_id": wallet_id,
            "type": "EXPENSE",
            "category": "Rent",
            "amount_minor": 3000,
            "note": "november",
            "date": "2024-11-20",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(
        &app,
        "GET",
        &format!("/transactions?wallet_id={wallet_id}"),
        Some("alice"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = body["transactions"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["date"], "2024-12-05");

    let (status, body) = call(
        &app,
        "GET",
        &format!("/reports/summary?wallet_id={wallet_id}&month=12&year=2024"),
        Some("alice"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["income"], "100.00");
    assert_eq!(body["totals"]["expense"], "0.00");
    assert_eq!(body["totals"]["balance"], "100.00");
    assert_eq!(body["period"]["month"], 12);

    let (status, _) = call(&app, "GET", "/reports/summary?month=12", Some("alice"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        "GET",
        &format!("/reports/summary?wallet_id={wallet_id}"),
        Some("bob"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let tx_id = income["id"].as_str().unwrap();
    let (status, body) = call(
        &app,
        "PATCH",
        &format!("/transactions/{tx_id}"),
        Some("alice"),
        Some(json!({ "amount_minor": 12000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], "120.00");

    let (status, _) = call(&app, "DELETE", &format!("/transactions/{tx_id}"), Some("bob"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, "DELETE", &format!("/transactions/{tx_id}"), Some("alice"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, "GET", &format!("/transactions/{tx_id}"), Some("alice"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
