use axum::{
    extract::Request,
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::common::InventoryError;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Middleware rejecting request bodies that are not declared as JSON
///
/// Parameters such as `; charset=utf-8` are allowed; the media type itself
/// must be `application/json`. A missing header is rejected too.
pub async fn require_json_content_type(request: Request, next: Next) -> Response {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if !is_json(content_type) {
        tracing::error!("Invalid Content-Type: {}", content_type);
        return InventoryError::UnsupportedMedia(format!(
            "Content-Type must be {}",
            JSON_CONTENT_TYPE
        ))
        .into_response();
    }

    next.run(request).await
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|media_type| media_type.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_media_types_are_accepted() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("Application/JSON"));
    }

    #[test]
    fn other_media_types_are_rejected() {
        assert!(!is_json(""));
        assert!(!is_json("string"));
        assert!(!is_json("text/plain"));
        assert!(!is_json("application/jsonl"));
    }
}
