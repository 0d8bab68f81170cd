use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Create routes for the products feature.
///
/// `/api/products/categories` is registered before the `{id}` routes so the
/// literal segment wins.
pub fn routes(service: Arc<ProductService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/api/products/categories",
            get(handlers::list_product_categories),
        )
        .route(
            "/api/products/{id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        // Image uploads are capped by the configured limit, not axum's 2 MB default
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use sqlx::postgres::PgPoolOptions;

    use super::routes;
    use crate::core::config::LocalStorageConfig;
    use crate::features::products::services::ProductService;
    use crate::modules::storage::LocalStore;

    /// Server whose pool never connects; requests that get past the multipart
    /// and storage stages fail at the database with a 500.
    fn test_server(max_body_size: usize, uploads_root: &std::path::Path) -> TestServer {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(1))
            .connect_lazy("postgres://nobody@127.0.0.1:1/unreachable")
            .expect("lazy pool should build");

        let store = LocalStore::new(LocalStorageConfig {
            root: uploads_root.to_path_buf(),
            public_base_url: "http://localhost:3000".to_string(),
        });

        let service = Arc::new(ProductService::new(pool, Arc::new(store)));
        TestServer::new(routes(service, max_body_size)).expect("server should build")
    }

    fn product_form(image_size: usize) -> MultipartForm {
        MultipartForm::new()
            .add_text("title", "Puerta templada")
            .add_text("description", "Puerta de vidrio templado 10mm")
            .add_text("color", "bronce")
            .add_text("price", "1250.50")
            .add_text("category", "puertas")
            .add_part(
                "image",
                Part::bytes(vec![0u8; image_size])
                    .file_name("puerta.png")
                    .mime_type("image/png"),
            )
    }

    #[tokio::test]
    async fn configured_limit_admits_uploads_over_two_megabytes() {
        let root = std::env::temp_dir().join(format!("vidrioarte-test-{}", uuid::Uuid::new_v4()));
        let server = test_server(25 * 1024 * 1024, &root);

        // A 3 MB image passes the multipart reader and the storage write, then
        // fails at the unreachable database. A body-size rejection would be 400.
        let response = server
            .post("/api/products")
            .multipart(product_form(3 * 1024 * 1024))
            .await;

        assert_ne!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn uploads_over_the_configured_limit_are_rejected() {
        let root = std::env::temp_dir().join(format!("vidrioarte-test-{}", uuid::Uuid::new_v4()));
        let server = test_server(64 * 1024, &root);

        let response = server
            .post("/api/products")
            .multipart(product_form(256 * 1024))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);

        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
