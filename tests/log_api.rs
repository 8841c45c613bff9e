mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::Utc;
use serde_json::json;

async fn create_activity(pool: &sqlx::SqlitePool, name: &str) -> i64 {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO activities (name, specific, measurable, timebound, completed, created_at, updated_at) \
         VALUES (?, 's', 'm', '2026-01-01', 0, ?, ?)",
    )
    .bind(name)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

#[actix_web::test]
async fn create_log_without_fields_returns_400() {
    let pool = common::memory_pool().await;
    let app = test::init_service(common::test_app(pool.clone(), common::dummy_mailer())).await;

    let req = test::TestRequest::post()
        .uri("/api/logs")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn create_log_against_unknown_activity_returns_404_and_inserts_nothing() {
    let pool = common::memory_pool().await;
    let app = test::init_service(common::test_app(pool.clone(), common::dummy_mailer())).await;

    let req = test::TestRequest::post()
        .uri("/api/logs")
        .set_json(json!({ "activity_id": 999, "text": "ran today" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Activity not found");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM logs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_web::test]
async fn structured_metrics_round_trip() {
    let pool = common::memory_pool().await;
    let app = test::init_service(common::test_app(pool.clone(), common::dummy_mailer())).await;
    let activity_id = create_activity(&pool, "Run 5k").await;

    let metrics = json!({ "distance": 5.2, "unit": "km" });
    let req = test::TestRequest::post()
        .uri("/api/logs")
        .set_json(json!({
            "activity_id": activity_id,
            "text": "morning run",
            "metrics": metrics
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["activity_name"], "Run 5k");

    let req = test::TestRequest::get()
        .uri(&format!("/api/logs/{}", created["id"]))
        .to_request();
    let fetched: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let stored = fetched["metrics"].as_str().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(stored).unwrap();
    assert_eq!(parsed, metrics);
}

#[actix_web::test]
async fn plain_text_metrics_stored_verbatim() {
    let pool = common::memory_pool().await;
    let app = test::init_service(common::test_app(pool.clone(), common::dummy_mailer())).await;
    let activity_id = create_activity(&pool, "Run 5k").await;

    let req = test::TestRequest::post()
        .uri("/api/logs")
        .set_json(json!({
            "activity_id": activity_id,
            "text": "easy run",
            "metrics": "felt strong"
        }))
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["metrics"], "felt strong");
}

#[actix_web::test]
async fn list_filters_by_activity_and_includes_activity_name() {
    let pool = common::memory_pool().await;
    let app = test::init_service(common::test_app(pool.clone(), common::dummy_mailer())).await;
    let first = create_activity(&pool, "Run 5k").await;
    let second = create_activity(&pool, "Read more").await;

    for (activity_id, text) in [(first, "ran"), (second, "read"), (first, "ran again")] {
        let req = test::TestRequest::post()
            .uri("/api/logs")
            .set_json(json!({ "activity_id": activity_id, "text": text }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/api/logs").to_request();
    let all: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
    // newest first
    assert_eq!(all[0]["text"], "ran again");

    let req = test::TestRequest::get()
        .uri(&format!("/api/logs?activity_id={first}"))
        .to_request();
    let filtered: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 2);
    for log in filtered {
        assert_eq!(log["activity_id"].as_i64().unwrap(), first);
        assert_eq!(log["activity_name"], "Run 5k");
    }
}

#[actix_web::test]
async fn update_rewrites_text_and_metrics() {
    let pool = common::memory_pool().await;
    let app = test::init_service(common::test_app(pool.clone(), common::dummy_mailer())).await;
    let activity_id = create_activity(&pool, "Run 5k").await;

    let req = test::TestRequest::post()
        .uri("/api/logs")
        .set_json(json!({ "activity_id": activity_id, "text": "draft" }))
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/logs/{id}"))
        .set_json(json!({ "text": "final", "metrics": { "pace": "5:30" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(updated["text"], "final");
    assert!(updated["metrics"].as_str().unwrap().contains("5:30"));
}

#[actix_web::test]
async fn update_unknown_log_returns_404() {
    let pool = common::memory_pool().await;
    let app = test::init_service(common::test_app(pool.clone(), common::dummy_mailer())).await;

    let req = test::TestRequest::put()
        .uri("/api/logs/123")
        .set_json(json!({ "text": "anything" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Log not found");
}

#[actix_web::test]
async fn delete_log_then_fetch_returns_404() {
    let pool = common::memory_pool().await;
    let app = test::init_service(common::test_app(pool.clone(), common::dummy_mailer())).await;
    let activity_id = create_activity(&pool, "Run 5k").await;

    let req = test::TestRequest::post()
        .uri("/api/logs")
        .set_json(json!({ "activity_id": activity_id, "text": "short lived" }))
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/logs/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Log deleted successfully");

    let req = test::TestRequest::get()
        .uri(&format!("/api/logs/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn stats_with_zero_logs() {
    let pool = common::memory_pool().await;
    let app = test::init_service(common::test_app(pool.clone(), common::dummy_mailer())).await;
    let activity_id = create_activity(&pool, "Run 5k").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/logs/activity/{activity_id}/stats"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let stats: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(stats["activity_name"], "Run 5k");
    assert_eq!(stats["stats"]["total_logs"], json!(0));
    assert_eq!(stats["stats"]["first_log_date"], json!(null));
    assert_eq!(stats["stats"]["last_log_date"], json!(null));
    assert_eq!(stats["stats"]["days_logged"], json!(0));
    assert_eq!(stats["recent_logs"], json!([]));
}

#[actix_web::test]
async fn stats_counts_logs_and_distinct_days() {
    let pool = common::memory_pool().await;
    let app = test::init_service(common::test_app(pool.clone(), common::dummy_mailer())).await;
    let activity_id = create_activity(&pool, "Run 5k").await;

    for text in ["one", "two", "three"] {
        let req = test::TestRequest::post()
            .uri("/api/logs")
            .set_json(json!({ "activity_id": activity_id, "text": text }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/logs/activity/{activity_id}/stats"))
        .to_request();
    let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let today = Utc::now().format("%Y-%m-%d").to_string();
    assert_eq!(stats["stats"]["total_logs"], json!(3));
    assert_eq!(stats["stats"]["days_logged"], json!(1));
    assert_eq!(stats["stats"]["first_log_date"], json!(today));
    assert_eq!(stats["stats"]["last_log_date"], json!(today));
    assert_eq!(stats["recent_logs"].as_array().unwrap().len(), 3);
    assert_eq!(stats["recent_logs"][0]["text"], "three");
}

#[actix_web::test]
async fn stats_for_unknown_activity_returns_404() {
    let pool = common::memory_pool().await;
    let app = test::init_service(common::test_app(pool.clone(), common::dummy_mailer())).await;

    let req = test::TestRequest::get()
        .uri("/api/logs/activity/404/stats")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
