// Route exports
pub mod auth;
pub mod matches;
pub mod messages;
pub mod profiles;
pub mod quiz;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::compatibility::CompatibilityParams;
use crate::core::quiz::QuizEngine;
use crate::models::HealthResponse;
use crate::services::{ApiClient, ProfileDirectory, Storage};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub api: Arc<ApiClient>,
    pub directory: Arc<ProfileDirectory>,
    pub quiz: Arc<QuizEngine>,
    pub compatibility: CompatibilityParams,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(auth::configure)
            .configure(profiles::configure)
            .configure(matches::configure)
            .configure(quiz::configure)
            .configure(messages::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let records = state.storage.len().await;
    tracing::debug!("Health check, {} storage records", records);

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
