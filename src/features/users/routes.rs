use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Create routes for the users feature.
///
/// GET on `/api/users/{key}` treats the segment as a username, while PUT and
/// DELETE treat it as the account id.
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/api/users/{key}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .with_state(service)
}
