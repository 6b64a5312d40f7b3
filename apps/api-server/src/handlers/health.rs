//! Liveness endpoint.

use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;

use agora_shared::ApiResponse;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(HealthResponse {
        status: "ok",
        service: "agora-api",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    }))
}
