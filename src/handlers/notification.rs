use actix_web::{web, HttpResponse};
use chrono::{Duration, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::activity::Activity;
use crate::models::log::Log;
use crate::utils::email::Mailer;

#[derive(Deserialize)]
pub struct AchievementRequest {
    activity_id: Option<i64>,
    message: Option<String>,
}

#[derive(Deserialize)]
pub struct ActivityIdRequest {
    activity_id: Option<i64>,
}

// The original UI posts whatever fields the form held; absent ones
// default to empty and the provider rejects unusable payloads.
#[derive(Deserialize)]
pub struct NewGoalRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    goal: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    measurable: String,
    #[serde(default)]
    timebound: String,
    #[serde(default)]
    relevant: String,
}

/// Resolve the target activity and its buddy address, enforcing the
/// shared precondition of the activity-bound notification routes.
async fn buddy_activity(
    pool: &SqlitePool,
    activity_id: Option<i64>,
) -> Result<(Activity, String), AppError> {
    let id = activity_id.ok_or_else(|| AppError::BadRequest("Missing activity_id".to_string()))?;

    let activity = sqlx::query_as::<_, Activity>("SELECT * FROM activities WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

    let buddy_email = activity
        .buddy_email
        .clone()
        .ok_or_else(|| AppError::BadRequest("No buddy email for this activity".to_string()))?;

    Ok((activity, buddy_email))
}

fn log_bullets(logs: &[Log]) -> String {
    logs.iter()
        .map(|log| format!("• {} ({})", log.text, log.created_at.to_rfc3339()))
        .collect::<Vec<_>>()
        .join("<br>")
}

// POST /api/notifications/achievement
pub async fn achievement(
    pool: web::Data<SqlitePool>,
    mailer: web::Data<Mailer>,
    payload: web::Json<AchievementRequest>,
) -> Result<HttpResponse, AppError> {
    let (activity, buddy_email) = buddy_activity(&pool, payload.activity_id).await?;

    let recent_logs = sqlx::query_as::<_, Log>(
        "SELECT * FROM logs WHERE activity_id = ? ORDER BY created_at DESC LIMIT 5",
    )
    .bind(activity.id)
    .fetch_all(&**pool)
    .await?;

    let html = format!(
        "<p>Your buddy made an achievement:</p>\
         <p>{}</p>\
         <p>Recent progress:</p>\
         <p>{}</p>",
        payload.message.as_deref().unwrap_or(""),
        log_bullets(&recent_logs),
    );

    mailer
        .send(&buddy_email, "Progress Buddy: Achievement Notification", &html)
        .await
        .map_err(|err| AppError::ExternalService(err.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

// POST /api/notifications/goal-completed
pub async fn goal_completed(
    pool: web::Data<SqlitePool>,
    mailer: web::Data<Mailer>,
    payload: web::Json<ActivityIdRequest>,
) -> Result<HttpResponse, AppError> {
    let (activity, buddy_email) = buddy_activity(&pool, payload.activity_id).await?;

    let html = format!(
        "<p>Congratulations! Your buddy completed the goal:</p>\
         <strong>{}</strong>\
         <p>Description: {}</p>",
        activity.name,
        activity.description.as_deref().unwrap_or(""),
    );

    mailer
        .send(&buddy_email, "Progress Buddy: Goal Completed!", &html)
        .await
        .map_err(|err| AppError::ExternalService(err.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

// POST /api/notifications/weekly-summary
pub async fn weekly_summary(
    pool: web::Data<SqlitePool>,
    mailer: web::Data<Mailer>,
    payload: web::Json<ActivityIdRequest>,
) -> Result<HttpResponse, AppError> {
    let (activity, buddy_email) = buddy_activity(&pool, payload.activity_id).await?;

    let since = Utc::now() - Duration::days(7);
    let logs = sqlx::query_as::<_, Log>(
        "SELECT * FROM logs WHERE activity_id = ? AND created_at >= ? ORDER BY created_at DESC",
    )
    .bind(activity.id)
    .bind(since)
    .fetch_all(&**pool)
    .await?;

    let log_summary = if logs.is_empty() {
        "No progress logged this week.".to_string()
    } else {
        log_bullets(&logs)
    };

    let html = format!(
        "<p>Weekly Progress Summary for Goal: <strong>{}</strong></p><p>{}</p>",
        activity.name, log_summary,
    );

    mailer
        .send(&buddy_email, "Progress Buddy: Weekly Progress Summary", &html)
        .await
        .map_err(|err| AppError::ExternalService(err.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

// POST /api/notifications
pub async fn new_goal(
    mailer: web::Data<Mailer>,
    payload: web::Json<NewGoalRequest>,
) -> Result<HttpResponse, AppError> {
    let html = format!(
        "<h2>Your buddy set a new goal!</h2>\
         <strong>{}</strong>\
         <p>Description: {}</p>\
         <p>Target: {}</p>\
         <p>Due: {}</p>\
         <p>Why this matters: {}</p>",
        payload.goal, payload.description, payload.measurable, payload.timebound, payload.relevant,
    );

    let result = mailer
        .send(&payload.email, "Your Progress Buddy Goal", &html)
        .await
        .map_err(|err| AppError::ExternalService(err.to_string()))?;

    log::info!("New-goal notification dispatched to {}", payload.email);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true, "result": result })))
}
