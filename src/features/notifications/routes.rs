use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::features::notifications::handlers;
use crate::modules::mail::Mailer;

/// Create routes for the notifications feature. The quotation endpoint
/// carries a PDF, so its body limit follows the configured size.
pub fn routes(mailer: Arc<Mailer>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/notifications/quotation",
            post(handlers::send_quotation_email).layer(DefaultBodyLimit::max(max_body_size)),
        )
        .route("/api/notifications/inquiry", post(handlers::send_inquiry))
        .with_state(mailer)
}
