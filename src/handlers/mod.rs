pub mod activity;
pub mod log;
pub mod notification;

use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};

/// Mounts every `/api` route. Shared between the server binary and the
/// integration tests.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::resource("/health").route(web::get().to(health)))
            .service(
                web::resource("/activities")
                    .route(web::get().to(activity::list_activities))
                    .route(web::post().to(activity::create_activity)),
            )
            .service(
                web::resource("/activities/{id}")
                    .route(web::get().to(activity::get_activity))
                    .route(web::put().to(activity::update_activity))
                    .route(web::delete().to(activity::delete_activity)),
            )
            .service(
                web::resource("/activities/{id}/complete")
                    .route(web::patch().to(activity::complete_activity)),
            )
            .service(
                web::resource("/logs")
                    .route(web::get().to(log::list_logs))
                    .route(web::post().to(log::create_log)),
            )
            .service(
                web::resource("/logs/activity/{id}/stats")
                    .route(web::get().to(log::activity_stats)),
            )
            .service(
                web::resource("/logs/{id}")
                    .route(web::get().to(log::get_log))
                    .route(web::put().to(log::update_log))
                    .route(web::delete().to(log::delete_log)),
            )
            .service(
                web::resource("/notifications/achievement")
                    .route(web::post().to(notification::achievement)),
            )
            .service(
                web::resource("/notifications/goal-completed")
                    .route(web::post().to(notification::goal_completed)),
            )
            .service(
                web::resource("/notifications/weekly-summary")
                    .route(web::post().to(notification::weekly_summary)),
            )
            .service(
                web::resource("/notifications").route(web::post().to(notification::new_goal)),
            ),
    );
}

// GET /api/health
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "message": "Progress Buddy API is running"
    }))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "Route not found" }))
}

/// JSON extractor config that keeps malformed-body errors on the JSON
/// error contract instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
        )
        .into()
    })
}
