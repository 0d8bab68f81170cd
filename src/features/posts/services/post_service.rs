use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::posts::dtos::{PostFields, PostResponseDto};
use crate::features::posts::models::Post;
use crate::modules::storage::{release_quietly, MediaFolder, MediaStore};
use crate::shared::multipart::UploadedFile;

/// Service for blog post operations
pub struct PostService {
    pool: PgPool,
    media: Arc<dyn MediaStore>,
}

impl PostService {
    pub fn new(pool: PgPool, media: Arc<dyn MediaStore>) -> Self {
        Self { pool, media }
    }

    /// List posts, newest first
    pub async fn list(&self) -> Result<Vec<PostResponseDto>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, description, category, image_url, image_key, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts.into_iter().map(|p| p.into()).collect())
    }

    /// Store the image, then insert the row
    pub async fn create(&self, fields: PostFields, image: UploadedFile) -> Result<PostResponseDto> {
        let stored = self
            .media
            .store(
                MediaFolder::BlogImages,
                &image.filename,
                &image.content_type,
                image.data,
            )
            .await?;

        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, description, category, image_url, image_key, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id, title, description, category, image_url, image_key, created_at
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.category)
        .bind(&stored.url)
        .bind(&stored.key)
        .fetch_one(&self.pool)
        .await?;

        Ok(post.into())
    }

    /// Update fields and optionally replace the image
    pub async fn update(
        &self,
        id: i64,
        fields: PostFields,
        image: Option<UploadedFile>,
    ) -> Result<PostResponseDto> {
        let current = self.fetch(id).await?;

        let post = match image {
            Some(image) => {
                let stored = self
                    .media
                    .store(
                        MediaFolder::BlogImages,
                        &image.filename,
                        &image.content_type,
                        image.data,
                    )
                    .await?;

                let updated = sqlx::query_as::<_, Post>(
                    r#"
                    UPDATE posts
                    SET title = $2, description = $3, category = $4, image_url = $5, image_key = $6
                    WHERE id = $1
                    RETURNING id, title, description, category, image_url, image_key, created_at
                    "#,
                )
                .bind(id)
                .bind(&fields.title)
                .bind(&fields.description)
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
                sqlx::query_as::<_, Post>(
                    r#"
                    UPDATE posts
                    SET title = $2, description = $3, category = $4
                    WHERE id = $1
                    RETURNING id, title, description, category, image_url, image_key, created_at
                    "#,
                )
                .bind(id)
                .bind(&fields.title)
                .bind(&fields.description)
                .bind(&fields.category)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(post.into())
    }

    /// Release the image, then delete the row
    pub async fn delete(&self, id: i64) -> Result<()> {
        let current = self.fetch(id).await?;

        release_quietly(
            self.media.as_ref(),
            &current.image_url,
            current.image_key.as_deref(),
        )
        .await;

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn fetch(&self, id: i64) -> Result<Post> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, description, category, image_url, image_key, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post '{}' not found", id)))
    }
}
