use axum::Json;
use chrono::SecondsFormat;
use chrono::Utc;
use serde::Serialize;

/// Liveness probe; does not touch the database.
pub async fn health() -> Json<HealthResponseData> {
    Json(HealthResponseData {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub status: String,
    pub timestamp: String,
}
