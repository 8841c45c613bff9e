use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::errors::AppError;
use crate::models::activity::{Activity, ActivityWithLogs};
use crate::models::log::Log;
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
pub struct ActivityRequest {
    #[validate(required(message = "Missing required field: name"))]
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    name: Option<String>,

    description: Option<String>,

    #[validate(required(message = "Missing required field: specific"))]
    #[validate(length(min = 1, message = "Specific cannot be empty"))]
    specific: Option<String>,

    #[validate(required(message = "Missing required field: measurable"))]
    #[validate(length(min = 1, message = "Measurable cannot be empty"))]
    measurable: Option<String>,

    achievable: Option<String>,

    relevant: Option<String>,

    #[validate(required(message = "Missing required field: timebound"))]
    #[validate(length(min = 1, message = "Timebound cannot be empty"))]
    timebound: Option<String>,

    #[validate(email(message = "Invalid buddy email"))]
    buddy_email: Option<String>,

    // Ignored on create; PUT is a full replace, so an absent flag means false.
    #[serde(default)]
    completed: bool,
}

async fn fetch_activity(pool: &SqlitePool, id: i64) -> Result<Activity, AppError> {
    sqlx::query_as::<_, Activity>("SELECT * FROM activities WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))
}

// GET /api/activities
pub async fn list_activities(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let activities =
        sqlx::query_as::<_, Activity>("SELECT * FROM activities ORDER BY created_at DESC")
            .fetch_all(&**pool)
            .await?;

    Ok(HttpResponse::Ok().json(activities))
}

// GET /api/activities/{id}
pub async fn get_activity(
    pool: web::Data<SqlitePool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let activity = fetch_activity(&pool, *id).await?;

    let logs = sqlx::query_as::<_, Log>(
        "SELECT * FROM logs WHERE activity_id = ? ORDER BY created_at DESC",
    )
    .bind(*id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(ActivityWithLogs { activity, logs }))
}

// POST /api/activities
pub async fn create_activity(
    pool: web::Data<SqlitePool>,
    payload: web::Json<ActivityRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO activities \
         (name, description, specific, measurable, achievable, relevant, timebound, buddy_email, completed, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(payload.name.as_deref())
    .bind(payload.description.as_deref())
    .bind(payload.specific.as_deref())
    .bind(payload.measurable.as_deref())
    .bind(payload.achievable.as_deref())
    .bind(payload.relevant.as_deref())
    .bind(payload.timebound.as_deref())
    .bind(payload.buddy_email.as_deref())
    .bind(false)
    .bind(now)
    .bind(now)
    .execute(&**pool)
    .await?;

    let activity = fetch_activity(&pool, result.last_insert_rowid()).await?;
    Ok(HttpResponse::Created().json(activity))
}

// PUT /api/activities/{id}
pub async fn update_activity(
    pool: web::Data<SqlitePool>,
    id: web::Path<i64>,
    payload: web::Json<ActivityRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let now = Utc::now();
    let result = sqlx::query(
        "UPDATE activities \
         SET name = ?, description = ?, specific = ?, measurable = ?, achievable = ?, \
             relevant = ?, timebound = ?, buddy_email = ?, completed = ?, updated_at = ? \
         WHERE id = ?",
    )
    .bind(payload.name.as_deref())
    .bind(payload.description.as_deref())
    .bind(payload.specific.as_deref())
    .bind(payload.measurable.as_deref())
    .bind(payload.achievable.as_deref())
    .bind(payload.relevant.as_deref())
    .bind(payload.timebound.as_deref())
    .bind(payload.buddy_email.as_deref())
    .bind(payload.completed)
    .bind(now)
    .bind(*id)
    .execute(&**pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }

    let activity = fetch_activity(&pool, *id).await?;
    Ok(HttpResponse::Ok().json(activity))
}

// DELETE /api/activities/{id}
pub async fn delete_activity(
    pool: web::Data<SqlitePool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let result = sqlx::query("DELETE FROM activities WHERE id = ?")
        .bind(*id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Activity deleted successfully" })))
}

// PATCH /api/activities/{id}/complete
pub async fn complete_activity(
    pool: web::Data<SqlitePool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let now = Utc::now();
    let result = sqlx::query("UPDATE activities SET completed = 1, updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(*id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }

    let activity = fetch_activity(&pool, *id).await?;
    Ok(HttpResponse::Ok().json(activity))
}
