#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use url::Url;
use wiremock::MockServer;

use progress_buddy_backend::utils::email::Mailer;
use progress_buddy_backend::{db, handlers};

/// Fresh in-memory database with the schema applied. One connection,
/// never recycled — `:memory:` databases die with their connection.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    db::create_tables(&pool).await.unwrap();
    pool
}

/// Mailer pointed at a wiremock server standing in for Resend.
pub fn mock_mailer(server: &MockServer) -> Mailer {
    Mailer::new(
        Url::parse(&server.uri()).unwrap(),
        "test-key".to_string(),
        "onboarding@resend.dev".to_string(),
    )
}

/// Mailer pointed at a closed port, for suites that never send mail.
pub fn dummy_mailer() -> Mailer {
    Mailer::new(
        Url::parse("http://127.0.0.1:1").unwrap(),
        "test-key".to_string(),
        "onboarding@resend.dev".to_string(),
    )
}

/// The full application as the server binary wires it, minus logging
/// middleware.
pub fn test_app(
    pool: SqlitePool,
    mailer: Mailer,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(pool))
        .app_data(web::Data::new(mailer))
        .app_data(handlers::json_config())
        .configure(handlers::config)
        .default_service(web::route().to(handlers::not_found))
}
