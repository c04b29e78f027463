use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;
use server::{ServerState, router};

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    router(ServerState {
        engine: std::sync::Arc::new(engine),
    })
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    role: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        builder = builder.header("X-Dev-User-Role", role);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn submit(app: &Router, title: &str, amount: f64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/expenses",
        Some("EMPLOYEE"),
        Some(json!({ "title": title, "amount": amount })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn missing_or_unknown_role_is_unauthorized() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/api/expenses/my-expenses", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].as_str().unwrap().contains("X-Dev-User-Role"));

    let (status, _) = send(&app, "GET", "/api/expenses/my-expenses", Some("ADMIN"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_returns_pending_expense_with_decimal_amount() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/expenses",
        Some("employee"),
        Some(json!({ "title": "Lunch", "amount": 42.50, "receiptUrl": "https://r.example/1" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "PENDING_MANAGER");
    assert_eq!(body["amount"], json!(42.5));
    assert_eq!(body["receiptUrl"], "https://r.example/1");
    assert_eq!(body["employeeName"], "John Smith");
    assert_eq!(body["employeeEmail"], "john.smith@company.com");
}

#[tokio::test]
async fn invalid_amounts_are_unprocessable() {
    let app = app().await;
    for amount in [json!(0), json!(-5), json!(12.345), json!(42.500000001)] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/expenses",
            Some("EMPLOYEE"),
            Some(json!({ "title": "Bad", "amount": amount })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{amount}");
    }
}

#[tokio::test]
async fn manager_endpoints_require_the_manager_role() {
    let app = app().await;
    let id = submit(&app, "Taxi", 18.0).await;

    let (status, _) = send(
        &app,
        "GET",
        "/api/expenses/pending-manager-approval",
        Some("EMPLOYEE"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/expenses/{id}/approve"),
        Some("FINANCE"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "GET",
        "/api/expenses/pending-manager-approval",
        Some("MANAGER"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn full_lifecycle_over_http() {
    let app = app().await;
    let id = submit(&app, "Lunch", 42.5).await;

    // Approve without a body at all.
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/expenses/{id}/approve"),
        Some("MANAGER"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PENDING_FINANCE");

    let (status, body) = send(
        &app,
        "GET",
        "/api/expenses/pending-finance-approval",
        Some("FINANCE"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], json!(id));

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/expenses/{id}/finance-approve"),
        Some("FINANCE"),
        Some(json!({ "reimbursementMethod": "Bank Transfer", "expectedPayoutDate": "2026-01-31" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PAID");

    let (_, paid) = send(&app, "GET", "/api/expenses/approved-by-finance", Some("FINANCE"), None).await;
    assert_eq!(paid.as_array().unwrap().len(), 1);

    let (status, history) = send(
        &app,
        "GET",
        &format!("/api/expenses/{id}/history"),
        Some("EMPLOYEE"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history[0]["step"], "MANAGER");
    assert_eq!(history[1]["step"], "FINANCE");
    assert_eq!(
        history[1]["paymentReference"],
        "Method: Bank Transfer | Expected Payout: 2026-01-31"
    );

    // Paid expenses are locked.
    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/expenses/{id}"),
        Some("EMPLOYEE"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn reject_requires_a_comment() {
    let app = app().await;
    let id = submit(&app, "Hotel", 200.0).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/expenses/{id}/reject"),
        Some("MANAGER"),
        Some(json!({ "comment": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "comment is required for rejection");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/expenses/{id}/reject"),
        Some("MANAGER"),
        Some(json!({ "comment": "Missing receipt" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "REJECTED_MANAGER");

    let (_, rejected) = send(&app, "GET", "/api/expenses/my-rejected", Some("EMPLOYEE"), None).await;
    assert_eq!(rejected.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/expenses/{id}"),
        Some("EMPLOYEE"),
        Some(json!({ "title": "Hotel", "amount": 180, "receiptUrl": "https://r.example/2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PENDING_MANAGER");
    assert_eq!(body["amount"], json!(180.0));
}

#[tokio::test]
async fn finance_reject_requires_a_comment() {
    let app = app().await;
    let id = submit(&app, "Flight", 450.0).await;
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/expenses/{id}/approve"),
        Some("MANAGER"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    for comment in ["", " \t "] {
        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/expenses/{id}/finance-reject"),
            Some("FINANCE"),
            Some(json!({ "comment": comment })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{comment:?}");
        assert_eq!(body["message"], "comment is required for rejection");
    }

    let (_, body) = send(&app, "GET", &format!("/api/expenses/{id}"), Some("FINANCE"), None).await;
    assert_eq!(body["status"], "PENDING_FINANCE");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/expenses/{id}/finance-reject"),
        Some("FINANCE"),
        Some(json!({ "comment": "Over budget" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "REJECTED_FINANCE");
}

#[tokio::test]
async fn unknown_expense_is_not_found() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/expenses/999", Some("MANAGER"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "expense 999 not found");
}

#[tokio::test]
async fn delete_pending_expense() {
    let app = app().await;
    let id = submit(&app, "Coffee", 3.2).await;

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/expenses/{id}"),
        Some("EMPLOYEE"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Expense deleted successfully");

    let (_, mine) = send(&app, "GET", "/api/expenses/my-expenses", Some("EMPLOYEE"), None).await;
    assert!(mine.as_array().unwrap().is_empty());
}
