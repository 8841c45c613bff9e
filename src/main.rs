use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{http, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use std::env;
use std::path::Path;

use progress_buddy_backend::utils::email::Mailer;
use progress_buddy_backend::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Open the database file, creating its directory on first run
    let database_path =
        env::var("DATABASE_PATH").unwrap_or_else(|_| "data/progress_buddy.db".to_string());
    if let Some(parent) = Path::new(&database_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let pool = db::connect(&database_path)
        .await
        .expect("Failed to open the database");
    db::create_tables(&pool)
        .await
        .expect("Failed to create database tables");
    info!("Database initialized at {}", database_path);

    let mailer = Mailer::from_env().expect("RESEND_API_KEY must be set");

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
    let frontend_url = env::var("FRONTEND_URL").ok();
    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:3001".to_string());
    info!("Starting server at {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(build_cors(&app_env, frontend_url.as_deref()))
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(mailer.clone()))
            .app_data(handlers::json_config())
            .configure(handlers::config)
            .default_service(web::route().to(handlers::not_found))
    })
    .bind(&bind_address)?
    .run()
    .await
}

/// CORS restricted to the configured frontend origin in production, the
/// local dev origins otherwise.
fn build_cors(app_env: &str, frontend_url: Option<&str>) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![http::header::CONTENT_TYPE])
        .supports_credentials();

    if app_env == "production" {
        cors = cors.allowed_origin(frontend_url.unwrap_or("https://progress-buddy.netlify.app"));
    } else {
        for origin in [
            "http://localhost:5173",
            "http://127.0.0.1:5173",
            "http://localhost:3000",
        ] {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
