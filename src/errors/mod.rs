use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    ExternalService(String),
    Database(sqlx::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ExternalService(msg) => write!(f, "External Service Error: {}", msg),
            AppError::Database(err) => write!(f, "Database Error: {}", err),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(msg) => {
                HttpResponse::NotFound().json(ErrorResponse { error: msg.clone() })
            }
            AppError::BadRequest(msg) => {
                HttpResponse::BadRequest().json(ErrorResponse { error: msg.clone() })
            }
            AppError::ExternalService(msg) => {
                HttpResponse::InternalServerError().json(ErrorResponse { error: msg.clone() })
            }
            AppError::Database(err) => {
                log::error!("Database error: {}", err);
                // Driver detail stays server-side unless running in development.
                let error = if development_mode() {
                    err.to_string()
                } else {
                    "Internal server error".to_string()
                };
                HttpResponse::InternalServerError().json(ErrorResponse { error })
            }
        }
    }
}

fn development_mode() -> bool {
    matches!(std::env::var("APP_ENV").as_deref(), Ok("development"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn status_codes_follow_taxonomy() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::ExternalService("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.error_response().status(), expected);
        }
    }

    #[test]
    fn external_service_message_passes_through() {
        let err = AppError::ExternalService("provider said no".into());
        assert_eq!(err.to_string(), "External Service Error: provider said no");
    }
}
