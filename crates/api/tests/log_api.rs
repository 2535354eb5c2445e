//! HTTP-level integration tests for the `/api/logs` endpoints: field
//! validation, the subcategory-only rule, upsert semantics, and the
//! advisory threshold headers.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_category, delete, get, post_json, post_log};
use serde_json::json;
use sqlx::SqlitePool;

async fn seed_coding(app: &axum::Router, threshold: Option<i64>) -> i64 {
    let work = create_category(app, "Work", None, None).await;
    create_category(app, "Coding", Some(work), threshold).await
}

// ---------------------------------------------------------------------------
// Test: POST /api/logs validates required fields and formats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_save_log_validation(pool: SqlitePool) {
    let app = build_test_app(pool);
    let coding = seed_coding(&app, None).await;

    for body in [
        json!({}),
        json!({"category_id": coding, "date": "2024-01-05"}),
        json!({"category_id": coding, "total_time": 30}),
        json!({"date": "2024-01-05", "total_time": 30}),
        json!({"category_id": coding, "date": "not-a-date", "total_time": 30}),
        json!({"category_id": coding, "date": "2024-02-30", "total_time": 30}),
        json!({"category_id": coding, "date": "2024-01-05", "total_time": -5}),
    ] {
        let response = post_json(app.clone(), "/api/logs", body.clone()).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "expected 400 for {body}"
        );
        assert!(body_json(response).await["error"].is_string());
    }

    // Nothing was written.
    let response = get(app, "/api/logs").await;
    assert_eq!(body_json(response).await, json!([]));
}

// ---------------------------------------------------------------------------
// Test: logging against a root category or unknown category is a 400
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_save_log_rejects_root_and_unknown_categories(pool: SqlitePool) {
    let app = build_test_app(pool);
    let work = create_category(&app, "Work", None, None).await;

    let response = post_log(&app, work, "2024-01-05", 30).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_log(&app, 999, "2024-01-05", 30).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, "/api/logs").await;
    assert_eq!(body_json(response).await, json!([]), "no row created");
}

// ---------------------------------------------------------------------------
// Test: upsert -- second write to the same (category, date) revises the row
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_save_log_upserts(pool: SqlitePool) {
    let app = build_test_app(pool);
    let coding = seed_coding(&app, None).await;

    let response = post_json(
        app.clone(),
        "/api/logs",
        json!({"category_id": coding, "date": "2024-01-05", "total_time": 40, "notes": "morning"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["created"], true);
    assert_eq!(body["total_time"], 40);
    let first_id = body["id"].as_i64().unwrap();

    let response = post_json(
        app.clone(),
        "/api/logs",
        json!({"category_id": coding, "date": "2024-01-05", "total_time": 55, "notes": "full day"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["created"], false);
    assert_eq!(body["id"], first_id, "same row revised in place");
    assert_eq!(body["total_time"], 55);
    assert_eq!(body["notes"], "full day");

    let response = get(app, "/api/logs").await;
    let logs = body_json(response).await;
    assert_eq!(logs.as_array().unwrap().len(), 1);
    assert_eq!(logs[0]["total_time"], 55);
}

// ---------------------------------------------------------------------------
// Test: threshold breach reported via headers, write still succeeds
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_threshold_headers_on_breach(pool: SqlitePool) {
    let app = build_test_app(pool);
    let coding = seed_coding(&app, Some(60)).await;

    // 40 minutes on the 5th: under the cap, no headers.
    let response = post_log(&app, coding, "2024-01-05", 40).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().get("x-threshold-exceeded").is_none());

    // 30 more on the 10th: 70 > 60 for January.
    let response = post_log(&app, coding, "2024-01-10", 30).await;
    assert_eq!(response.status(), StatusCode::CREATED, "write still succeeds");
    assert_eq!(
        response.headers().get("x-threshold-exceeded").unwrap(),
        "true"
    );
    assert_eq!(response.headers().get("x-threshold-value").unwrap(), "60");
    assert_eq!(response.headers().get("x-threshold-current").unwrap(), "70");

    // A fresh month starts the count over.
    let response = post_log(&app, coding, "2024-02-01", 30).await;
    assert!(response.headers().get("x-threshold-exceeded").is_none());
}

// ---------------------------------------------------------------------------
// Test: revising a day's log replaces its old value in the threshold sum
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_threshold_excludes_same_day_prior_value(pool: SqlitePool) {
    let app = build_test_app(pool);
    let coding = seed_coding(&app, Some(60)).await;

    post_log(&app, coding, "2024-01-05", 50).await;
    // Revising the 5th down to 20 leaves January at 20: no breach, even
    // though 50 + 20 would exceed the cap.
    let response = post_log(&app, coding, "2024-01-05", 20).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-threshold-exceeded").is_none());
}

// ---------------------------------------------------------------------------
// Test: GET /api/logs filters by range and category
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_logs_filters(pool: SqlitePool) {
    let app = build_test_app(pool);
    let coding = seed_coding(&app, None).await;
    let chores = create_category(&app, "Chores", None, None).await;
    let cleaning = create_category(&app, "Cleaning", Some(chores), None).await;

    post_log(&app, coding, "2024-01-05", 40).await;
    post_log(&app, coding, "2024-02-01", 30).await;
    post_log(&app, cleaning, "2024-01-10", 15).await;

    let response = get(
        app.clone(),
        "/api/logs?start_date=2024-01-01&end_date=2024-01-31",
    )
    .await;
    let logs = body_json(response).await;
    assert_eq!(logs.as_array().unwrap().len(), 2);

    let response = get(app.clone(), &format!("/api/logs?category_id={coding}")).await;
    let logs = body_json(response).await;
    assert_eq!(logs.as_array().unwrap().len(), 2);

    let response = get(app, "/api/logs?start_date=bogus").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: DELETE /api/logs/{id}
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_log(pool: SqlitePool) {
    let app = build_test_app(pool);
    let coding = seed_coding(&app, None).await;
    let response = post_log(&app, coding, "2024-01-05", 40).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = delete(app.clone(), &format!("/api/logs/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(app, &format!("/api/logs/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
