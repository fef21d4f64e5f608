use axum::http::{header, Method};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::shared::state::SharedState;

/// All application routes.
pub fn configure_routes(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/", get(handlers::status::status))
        .route("/sync", post(handlers::sync::run))
        .route("/data", get(handlers::shipments::data))
        .route("/export", post(handlers::shipments::export))
        .layer(cors)
        .with_state(state)
}
