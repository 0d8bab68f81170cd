use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::{ProductFields, ProductResponseDto};
use crate::features::products::models::Product;
use crate::modules::storage::{release_quietly, MediaFolder, MediaStore};
use crate::shared::multipart::UploadedFile;

/// Service for product catalog operations
pub struct ProductService {
    pool: PgPool,
    media: Arc<dyn MediaStore>,
}

impl ProductService {
    pub fn new(pool: PgPool, media: Arc<dyn MediaStore>) -> Self {
        Self { pool, media }
    }

    pub async fn list(&self) -> Result<Vec<ProductResponseDto>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, description, color, price, category, image_url, image_key
            FROM products
            ORDER BY title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products.into_iter().map(|p| p.into()).collect())
    }

    /// Category values currently in use, for populating catalog filters
    pub async fn distinct_categories(&self) -> Result<Vec<String>> {
        let categories = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT category
            FROM products
            WHERE category IS NOT NULL AND category <> ''
            ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Store the image, then insert the row. A stored image whose insert
    /// fails afterwards is left behind rather than rolled back.
    pub async fn create(
        &self,
        fields: ProductFields,
        image: UploadedFile,
    ) -> Result<ProductResponseDto> {
        let stored = self
            .media
            .store(
                MediaFolder::ProductImages,
                &image.filename,
                &image.content_type,
                image.data,
            )
            .await?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, title, description, color, price, category, image_url, image_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, description, color, price, category, image_url, image_key
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.color)
        .bind(fields.price)
        .bind(&fields.category)
        .bind(&stored.url)
        .bind(&stored.key)
        .fetch_one(&self.pool)
        .await?;

        Ok(product.into())
    }

    /// Update fields and optionally replace the image. With a new image the
    /// order is: store new, write row, then best-effort release of the old
    /// file so a failed deletion never blocks the update.
    pub async fn update(
        &self,
        id: Uuid,
        fields: ProductFields,
        image: Option<UploadedFile>,
    ) -> Result<ProductResponseDto> {
        let current = self.fetch(id).await?;

        let product = match image {
            Some(image) => {
                let stored = self
                    .media
                    .store(
                        MediaFolder::ProductImages,
                        &image.filename,
                        &image.content_type,
                        image.data,
                    )
                    .await?;

                let updated = sqlx::query_as::<_, Product>(
                    r#"
                    UPDATE products
                    SET title = $2, description = $3, color = $4, price = $5,
                        category = $6, image_url = $7, image_key = $8
                    WHERE id = $1
                    RETURNING id, title, description, color, price, category, image_url, image_key
                    "#,
                )
                .bind(id)
                .bind(&fields.title)
                .bind(&fields.description)
                .bind(&fields.color)
                .bind(fields.price)
                .bind(&fields.category)
                .bind(&stored.url)
                .bind(&stored.key)
                .fetch_one(&self.pool)
                .await?;

                release_quietly(
                    self.media.as_ref(),
                    &current.image_url,
                    current.image_key.as_deref(),
                )
                .await;

                updated
            }
            None => {
                sqlx::query_as::<_, Product>(
                    r#"
                    UPDATE products
                    SET title = $2, description = $3, color = $4, price = $5, category = $6
                    WHERE id = $1
                    RETURNING id, title, description, color, price, category, image_url, image_key
                    "#,
                )
                .bind(id)
                .bind(&fields.title)
                .bind(&fields.description)
                .bind(&fields.color)
                .bind(fields.price)
                .bind(&fields.category)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(product.into())
    }

    /// Release the image, then delete the row. An unknown id aborts before
    /// anything is touched.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let current = self.fetch(id).await?;

        release_quietly(
            self.media.as_ref(),
            &current.image_url,
            current.image_key.as_deref(),
        )
        .await;

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, description, color, price, category, image_url, image_key
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product '{}' not found", id)))
    }
}

// Database-backed tests; run with `cargo test -- --ignored` against a
// Postgres instance reachable through DATABASE_URL.
#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::shared::test_helpers::RecordingStore;

    fn fields(title: &str) -> ProductFields {
        ProductFields {
            title: title.to_string(),
            description: "Vidrio templado 10mm".to_string(),
            color: "bronce".to_string(),
            price: Decimal::new(125050, 2),
            category: "puertas".to_string(),
        }
    }

    fn image() -> UploadedFile {
        UploadedFile {
            data: vec![0x89, 0x50, 0x4e, 0x47],
            filename: "puerta.png".to_string(),
            content_type: "image/png".to_string(),
        }
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres instance via DATABASE_URL"]
    async fn update_without_file_keeps_the_stored_image(pool: PgPool) {
        let store = Arc::new(RecordingStore::new());
        let service = ProductService::new(pool, store.clone());

        let created = service
            .create(fields("Puerta templada"), image())
            .await
            .expect("create should succeed");

        let updated = service
            .update(created.id, fields("Puerta templada XL"), None)
            .await
            .expect("update should succeed");

        assert_eq!(updated.title, "Puerta templada XL");
        assert_eq!(updated.image_url, created.image_url);
        assert!(store.released().is_empty(), "nothing should be released");
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres instance via DATABASE_URL"]
    async fn replacing_the_image_releases_the_old_one(pool: PgPool) {
        let store = Arc::new(RecordingStore::new());
        let service = ProductService::new(pool, store.clone());

        let created = service
            .create(fields("Ventana fija"), image())
            .await
            .expect("create should succeed");

        let updated = service
            .update(created.id, fields("Ventana fija"), Some(image()))
            .await
            .expect("update should succeed");

        assert_ne!(updated.image_url, created.image_url);
        assert_eq!(store.released(), vec![created.image_url]);
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres instance via DATABASE_URL"]
    async fn deleting_unknown_product_is_not_found_and_releases_nothing(pool: PgPool) {
        let store = Arc::new(RecordingStore::new());
        let service = ProductService::new(pool, store.clone());

        let err = service
            .delete(Uuid::new_v4())
            .await
            .expect_err("unknown id should fail");
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.released().is_empty(), "nothing should be released");
    }
}
