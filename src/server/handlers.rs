//! HTTP route handlers

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::error;

/// Health check endpoint handler
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let body = |status: &str| {
        json!({
            "status": status,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION")
        })
    };

    match state.storage.health_check().await {
        Ok(()) => HttpResponse::Ok().json(body("healthy")),
        Err(e) => {
            error!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(body("unhealthy"))
        }
    }
}
