//! Application setup and router configuration.

use axum::{
    extract::Extension,
    handler::Handler,
    http::{header::CONTENT_TYPE, Method},
    middleware,
    routing::{delete, get},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::require_json_content_type;
use crate::server::routes::{
    count_inventories, count_inventory_by_id, create_inventory, delete_inventory, get_inventory,
    health_handler, list_inventories, query_inventories, reset_inventories, update_inventory,
};

/// Build the Axum application router
///
/// Handlers read the repository and schema from `ServerDeps`, shared through
/// an `Extension` layer. Write endpoints require a JSON content type, which
/// is checked before the handler looks anything up.
pub fn build_app(deps: ServerDeps) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let require_json = middleware::from_fn(require_json_content_type);

    Router::new()
        .route("/healthcheck", get(health_handler))
        .route(
            "/inventories",
            get(list_inventories).post(create_inventory.layer(require_json.clone())),
        )
        // Static segments take priority over /inventories/:id
        .route("/inventories/count", get(count_inventories))
        .route("/inventories/count/:id", get(count_inventory_by_id))
        .route("/inventories/query", get(query_inventories))
        .route("/inventories/reset", delete(reset_inventories))
        .route(
            "/inventories/:id",
            get(get_inventory)
                .put(update_inventory.layer(require_json))
                .delete(delete_inventory),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(Extension(deps)),
        )
}
