mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::Settings;
use routes::AppState;
use services::{ApiClient, ProfileDirectory, Storage};
use std::sync::Arc;
use tracing::{error, info};

use crate::core::compatibility::CompatibilityParams;
use crate::core::quiz::QuizEngine;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting CampusConnect service (log level: {})...", log_level);

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Process-local storage stands in for the per-browser state
    let storage = Arc::new(Storage::new());

    // Stub client for the remote backend
    let api = Arc::new(ApiClient::new(settings.api.base_url.clone()));
    info!("API client initialized for {}", settings.api.base_url);

    // Seeded candidate directory
    let directory = Arc::new(ProfileDirectory::seeded());
    info!("Profile directory seeded with {} candidates", directory.len());

    // Compatibility engine parameters
    let compatibility = CompatibilityParams {
        college_bonus: settings.matching.college_bonus,
        empty_interests_default: settings.matching.empty_interests_default,
        mutual_probability: settings.matching.mutual_probability,
        high_threshold: settings.matching.high_compatibility_threshold,
    };

    // Quiz engine with the built-in pool
    let quiz = Arc::new(QuizEngine::with_default_pool(
        settings.quiz.question_count,
        settings.quiz.time_limit_secs,
    ));

    info!(
        "Quiz engine initialized ({} questions, {}s limit)",
        settings.quiz.question_count, settings.quiz.time_limit_secs
    );

    // Build application state
    let app_state = AppState {
        storage,
        api,
        directory,
        quiz,
        compatibility,
    };

    // Countdown ticker: auto-completes quiz attempts at their deadline
    let ticker_state = app_state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        loop {
            interval.tick().await;
            for result in ticker_state.quiz.expire_due(chrono::Utc::now()).await {
                match routes::quiz::append_result(&ticker_state.storage, &result).await {
                    Ok(()) => info!(
                        "Quiz for user {} auto-completed at deadline ({}% match)",
                        result.user_id, result.match_percentage
                    ),
                    Err(e) => error!(
                        "Failed to persist auto-completed quiz for {}: {}",
                        result.user_id, e
                    ),
                }
            }
        }
    });

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
