// HTTP server setup (Axum)
pub mod app;
pub mod error_response;
pub mod middleware;
pub mod routes;

pub use app::*;
pub use error_response::ErrorResponse;
