use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::kernel::ServerDeps;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: u16,
    pub message: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint
///
/// Pings the inventory store. Returns 200 OK when it answers, 503 Service
/// Unavailable otherwise.
pub async fn health_handler(
    Extension(deps): Extension<ServerDeps>,
) -> (StatusCode, Json<HealthResponse>) {
    let backend = deps.store.backend_name().to_string();

    let error = match tokio::time::timeout(std::time::Duration::from_secs(5), deps.store.ping())
        .await
    {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(format!("Ping failed: {}", e)),
        Err(_) => Some("Ping timeout (>5s)".to_string()),
    };

    let (status_code, message) = match error {
        None => (StatusCode::OK, "Healthy"),
        Some(_) => (StatusCode::SERVICE_UNAVAILABLE, "Unhealthy"),
    };

    (
        status_code,
        Json(HealthResponse {
            status: status_code.as_u16(),
            message: message.to_string(),
            backend,
            error,
        }),
    )
}
