use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::catalog::handlers;
use crate::features::catalog::services::CatalogService;

/// Create routes for the reference-data feature
pub fn routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/catalog", get(handlers::list_catalog_entries))
        .route("/api/frames", get(handlers::list_frames))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/prices", get(handlers::list_prices))
        .route("/api/prices/{id}", put(handlers::update_price))
        .with_state(service)
}
