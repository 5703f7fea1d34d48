//! HTTP mapping for domain errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{InventoryError, StoreError};

/// JSON body returned for every error status
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            message: message.into(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl InventoryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InventoryError::Validation(_) => StatusCode::BAD_REQUEST,
            InventoryError::NotFound(_) => StatusCode::NOT_FOUND,
            InventoryError::UnsupportedMedia(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            InventoryError::Overflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
            InventoryError::Store(_) | InventoryError::Decode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        match &self {
            InventoryError::Validation(_) | InventoryError::NotFound(_) => {
                tracing::info!("{}", message);
            }
            InventoryError::Store(StoreError::Connection(_)) => {
                tracing::error!(critical = true, "{}", message);
            }
            _ => tracing::error!("{}", message),
        }

        ErrorResponse::new(self.status_code(), message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_status_codes() {
        assert_eq!(
            InventoryError::validation("name", "required field").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            InventoryError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            InventoryError::UnsupportedMedia("text/plain".into()).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            InventoryError::Overflow("too many".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            InventoryError::Store(StoreError::Connection("refused".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body_uses_reason_phrase() {
        let body = ErrorResponse::new(StatusCode::NOT_FOUND, "Inventory with id '9' was not found.");
        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Not Found");
    }
}
