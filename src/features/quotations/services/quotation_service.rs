use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::quotations::dtos::{QuotationFields, QuotationResponseDto};
use crate::features::quotations::models::{Quotation, QuotationStatus, QuotationWithOwner};
use crate::modules::storage::{release_quietly, MediaFolder, MediaStore};
use crate::shared::multipart::UploadedFile;

/// Service for quotation operations
pub struct QuotationService {
    pool: PgPool,
    media: Arc<dyn MediaStore>,
}

impl QuotationService {
    pub fn new(pool: PgPool, media: Arc<dyn MediaStore>) -> Self {
        Self { pool, media }
    }

    /// List quotations with the owning user's username, newest first
    pub async fn list(&self) -> Result<Vec<QuotationResponseDto>> {
        let quotations = sqlx::query_as::<_, QuotationWithOwner>(
            r#"
            SELECT q.id, q.quote_number, q.client_name, q.client_email, q.total_price,
                   q.status, q.user_id, u.username, q.document_url, q.document_key, q.created_at
            FROM quotations q
            JOIN users u ON u.id = q.user_id
            ORDER BY q.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(quotations.into_iter().map(|q| q.into()).collect())
    }

    /// Store the PDF, then insert the row
    pub async fn create(
        &self,
        fields: QuotationFields,
        document: UploadedFile,
    ) -> Result<QuotationResponseDto> {
        let stored = self
            .media
            .store(
                MediaFolder::QuotationDocuments,
                &document.filename,
                &document.content_type,
                document.data,
            )
            .await?;

        let quotation = sqlx::query_as::<_, Quotation>(
            r#"
            INSERT INTO quotations
                (id, quote_number, client_name, client_email, total_price, status,
                 user_id, document_url, document_key, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            RETURNING id, quote_number, client_name, client_email, total_price, status,
                      user_id, document_url, document_key, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&fields.quote_number)
        .bind(&fields.client_name)
        .bind(&fields.client_email)
        .bind(fields.total_price)
        .bind(fields.status.as_str())
        .bind(fields.user_id)
        .bind(&stored.url)
        .bind(&stored.key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_owner_violation(e, fields.user_id))?;

        Ok(quotation.into())
    }

    /// An owner id that points at no user surfaces as a validation failure
    fn map_owner_violation(e: sqlx::Error, user_id: Uuid) -> AppError {
        match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::Validation(format!("User '{}' does not exist", user_id))
            }
            _ => AppError::Database(e),
        }
    }

    /// Update fields and optionally replace the document
    pub async fn update(
        &self,
        id: Uuid,
        fields: QuotationFields,
        document: Option<UploadedFile>,
    ) -> Result<QuotationResponseDto> {
        let current = self.fetch(id).await?;

        let quotation = match document {
            Some(document) => {
                let stored = self
                    .media
                    .store(
                        MediaFolder::QuotationDocuments,
                        &document.filename,
                        &document.content_type,
                        document.data,
                    )
                    .await?;

                let updated = sqlx::query_as::<_, Quotation>(
                    r#"
                    UPDATE quotations
                    SET quote_number = $2, client_name = $3, client_email = $4,
                        total_price = $5, status = $6, user_id = $7,
                        document_url = $8, document_key = $9
                    WHERE id = $1
                    RETURNING id, quote_number, client_name, client_email, total_price, status,
                              user_id, document_url, document_key, created_at
                    "#,
                )
                .bind(id)
                .bind(&fields.quote_number)
                .bind(&fields.client_name)
                .bind(&fields.client_email)
                .bind(fields.total_price)
                .bind(fields.status.as_str())
                .bind(fields.user_id)
                .bind(&stored.url)
                .bind(&stored.key)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| Self::map_owner_violation(e, fields.user_id))?;

                release_quietly(
                    self.media.as_ref(),
                    &current.document_url,
                    current.document_key.as_deref(),
                )
                .await;

                updated
            }
            None => {
                sqlx::query_as::<_, Quotation>(
                    r#"
                    UPDATE quotations
                    SET quote_number = $2, client_name = $3, client_email = $4,
                        total_price = $5, status = $6, user_id = $7
                    WHERE id = $1
                    RETURNING id, quote_number, client_name, client_email, total_price, status,
                              user_id, document_url, document_key, created_at
                    "#,
                )
                .bind(id)
                .bind(&fields.quote_number)
                .bind(&fields.client_name)
                .bind(&fields.client_email)
                .bind(fields.total_price)
                .bind(fields.status.as_str())
                .bind(fields.user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| Self::map_owner_violation(e, fields.user_id))?
            }
        };

        Ok(quotation.into())
    }

    /// Set only the status; the row is untouched when the value is invalid
    pub async fn patch_status(&self, id: Uuid, status: QuotationStatus) -> Result<()> {
        let result = sqlx::query("UPDATE quotations SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Quotation '{}' not found",
                id
            )));
        }

        Ok(())
    }

    /// Release the document, then delete the row
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let current = self.fetch(id).await?;

        release_quietly(
            self.media.as_ref(),
            &current.document_url,
            current.document_key.as_deref(),
        )
        .await;

        sqlx::query("DELETE FROM quotations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Quotation> {
        sqlx::query_as::<_, Quotation>(
            r#"
            SELECT id, quote_number, client_name, client_email, total_price, status,
                   user_id, document_url, document_key, created_at
            FROM quotations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quotation '{}' not found", id)))
    }
}

// Database-backed tests; run with `cargo test -- --ignored` against a
// Postgres instance reachable through DATABASE_URL.
#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::shared::test_helpers::RecordingStore;

    async fn seed_user(pool: &PgPool) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, role, is_active)
            VALUES ($1, 'ventas', 'unused-hash', 'staff', TRUE)
            "#,
        )
        .bind(id)
        .execute(pool)
        .await
        .expect("seed user should insert");
        id
    }

    fn fields(user_id: Uuid) -> QuotationFields {
        QuotationFields {
            quote_number: "C-0001".to_string(),
            client_name: "Ana Gómez".to_string(),
            client_email: "ana@example.com".to_string(),
            total_price: Decimal::new(125000, 2),
            status: QuotationStatus::Pending,
            user_id,
        }
    }

    fn document() -> UploadedFile {
        UploadedFile {
            data: vec![0x25, 0x50, 0x44, 0x46],
            filename: "cotizacion.pdf".to_string(),
            content_type: "application/pdf".to_string(),
        }
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres instance via DATABASE_URL"]
    async fn update_to_unknown_owner_is_a_validation_failure(pool: PgPool) {
        let owner = seed_user(&pool).await;
        let service = QuotationService::new(pool, Arc::new(RecordingStore::new()));

        let created = service
            .create(fields(owner), document())
            .await
            .expect("create should succeed");

        let err = service
            .update(created.id, fields(Uuid::new_v4()), None)
            .await
            .expect_err("unknown owner should be rejected");
        assert!(matches!(err, AppError::Validation(_)));

        let err = service
            .update(created.id, fields(Uuid::new_v4()), Some(document()))
            .await
            .expect_err("unknown owner should be rejected");
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres instance via DATABASE_URL"]
    async fn create_for_unknown_owner_is_a_validation_failure(pool: PgPool) {
        let service = QuotationService::new(pool, Arc::new(RecordingStore::new()));

        let err = service
            .create(fields(Uuid::new_v4()), document())
            .await
            .expect_err("unknown owner should be rejected");
        assert!(matches!(err, AppError::Validation(_)));
    }
}
