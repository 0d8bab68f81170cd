use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, put},
    Router,
};

use crate::features::quotations::handlers;
use crate::features::quotations::services::QuotationService;

/// Create routes for the quotations feature. PDF uploads are capped by the
/// configured body limit.
pub fn routes(service: Arc<QuotationService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/quotations",
            get(handlers::list_quotations).post(handlers::create_quotation),
        )
        .route(
            "/api/quotations/{id}",
            put(handlers::update_quotation).delete(handlers::delete_quotation),
        )
        .route(
            "/api/quotations/{id}/status",
            patch(handlers::update_quotation_status),
        )
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(service)
}
