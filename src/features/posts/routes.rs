use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};

use crate::features::posts::handlers;
use crate::features::posts::services::PostService;

/// Create routes for the posts feature. Image uploads are capped by the
/// configured body limit.
pub fn routes(service: Arc<PostService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/api/posts/{id}",
            put(handlers::update_post).delete(handlers::delete_post),
        )
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(service)
}
