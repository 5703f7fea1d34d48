pub mod content_type;

pub use content_type::{require_json_content_type, JSON_CONTENT_TYPE};
