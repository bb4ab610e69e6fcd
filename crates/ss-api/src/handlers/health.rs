//! Health check

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: String,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "SkillSphere API is running",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
