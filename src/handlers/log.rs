use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::errors::AppError;
use crate::models::log::{ActivityStatsResponse, Log, LogStats, LogWithActivity};
use crate::utils::validation::validate_payload;

const JOINED_COLUMNS: &str = "\
    SELECT l.id, l.activity_id, l.text, l.metrics, l.created_at, a.name AS activity_name \
    FROM logs l JOIN activities a ON l.activity_id = a.id";

#[derive(Deserialize, Validate)]
pub struct LogRequest {
    #[validate(required(message = "Missing required field: activity_id"))]
    activity_id: Option<i64>,

    #[validate(required(message = "Missing required field: text"))]
    #[validate(length(min = 1, message = "Text cannot be empty"))]
    text: Option<String>,

    metrics: Option<serde_json::Value>,
}

#[derive(Deserialize, Validate)]
pub struct LogUpdateRequest {
    #[validate(required(message = "Missing required field: text"))]
    #[validate(length(min = 1, message = "Text cannot be empty"))]
    text: Option<String>,

    metrics: Option<serde_json::Value>,
}

#[derive(Deserialize)]
pub struct LogsQuery {
    activity_id: Option<i64>,
}

/// A JSON string is stored as-is; any structured value is serialized so
/// retrieval can parse it back to the original shape.
fn metrics_to_string(metrics: &Option<serde_json::Value>) -> Option<String> {
    match metrics {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text.clone()),
        Some(value) => Some(value.to_string()),
    }
}

async fn fetch_joined_log(pool: &SqlitePool, id: i64) -> Result<LogWithActivity, AppError> {
    sqlx::query_as::<_, LogWithActivity>(&format!("{JOINED_COLUMNS} WHERE l.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Log not found".to_string()))
}

// GET /api/logs?activity_id=
pub async fn list_logs(
    pool: web::Data<SqlitePool>,
    query: web::Query<LogsQuery>,
) -> Result<HttpResponse, AppError> {
    let logs = match query.activity_id {
        Some(activity_id) => {
            sqlx::query_as::<_, LogWithActivity>(&format!(
                "{JOINED_COLUMNS} WHERE l.activity_id = ? ORDER BY l.created_at DESC"
            ))
            .bind(activity_id)
            .fetch_all(&**pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, LogWithActivity>(&format!(
                "{JOINED_COLUMNS} ORDER BY l.created_at DESC"
            ))
            .fetch_all(&**pool)
            .await?
        }
    };

    Ok(HttpResponse::Ok().json(logs))
}

// GET /api/logs/{id}
pub async fn get_log(
    pool: web::Data<SqlitePool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let log = fetch_joined_log(&pool, *id).await?;
    Ok(HttpResponse::Ok().json(log))
}

// POST /api/logs
pub async fn create_log(
    pool: web::Data<SqlitePool>,
    payload: web::Json<LogRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let activity_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activities WHERE id = ?")
        .bind(payload.activity_id)
        .fetch_one(&**pool)
        .await?;
    if activity_count == 0 {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }

    let result = sqlx::query(
        "INSERT INTO logs (activity_id, text, metrics, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(payload.activity_id)
    .bind(payload.text.as_deref())
    .bind(metrics_to_string(&payload.metrics))
    .bind(Utc::now())
    .execute(&**pool)
    .await?;

    let log = fetch_joined_log(&pool, result.last_insert_rowid()).await?;
    Ok(HttpResponse::Created().json(log))
}

// PUT /api/logs/{id}
pub async fn update_log(
    pool: web::Data<SqlitePool>,
    id: web::Path<i64>,
    payload: web::Json<LogUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let result = sqlx::query("UPDATE logs SET text = ?, metrics = ? WHERE id = ?")
        .bind(payload.text.as_deref())
        .bind(metrics_to_string(&payload.metrics))
        .bind(*id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Log not found".to_string()));
    }

    let log = fetch_joined_log(&pool, *id).await?;
    Ok(HttpResponse::Ok().json(log))
}

// DELETE /api/logs/{id}
pub async fn delete_log(
    pool: web::Data<SqlitePool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let result = sqlx::query("DELETE FROM logs WHERE id = ?")
        .bind(*id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Log not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Log deleted successfully" })))
}

// GET /api/logs/activity/{id}/stats
pub async fn activity_stats(
    pool: web::Data<SqlitePool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let activity_name: String = sqlx::query_scalar("SELECT name FROM activities WHERE id = ?")
        .bind(*id)
        .fetch_optional(&**pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

    let stats = sqlx::query_as::<_, LogStats>(
        "SELECT COUNT(*) AS total_logs, \
                DATE(MIN(created_at)) AS first_log_date, \
                DATE(MAX(created_at)) AS last_log_date, \
                COUNT(DISTINCT DATE(created_at)) AS days_logged \
         FROM logs WHERE activity_id = ?",
    )
    .bind(*id)
    .fetch_one(&**pool)
    .await?;

    let recent_logs = sqlx::query_as::<_, Log>(
        "SELECT * FROM logs WHERE activity_id = ? ORDER BY created_at DESC LIMIT 10",
    )
    .bind(*id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(ActivityStatsResponse {
        activity_name,
        stats,
        recent_logs,
    }))
}
