use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::{
    CatalogEntryDto, CategoryDto, FrameDto, PriceEntryDto, UpdatePriceDto,
};
use crate::features::catalog::models::{CatalogEntry, Category, Frame, PriceEntry};

/// Service for the read-mostly reference tables
pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_catalog_entries(&self) -> Result<Vec<CatalogEntryDto>> {
        let entries = sqlx::query_as::<_, CatalogEntry>(
            "SELECT id, name, description FROM catalog_entries ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries.into_iter().map(|e| e.into()).collect())
    }

    pub async fn list_frames(&self) -> Result<Vec<FrameDto>> {
        let frames = sqlx::query_as::<_, Frame>(
            "SELECT id, name, description, price FROM frames ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(frames.into_iter().map(|f| f.into()).collect())
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryDto>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    pub async fn list_prices(&self) -> Result<Vec<PriceEntryDto>> {
        let prices = sqlx::query_as::<_, PriceEntry>(
            "SELECT id, description, price FROM prices ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(prices.into_iter().map(|p| p.into()).collect())
    }

    pub async fn update_price(&self, id: i32, dto: UpdatePriceDto) -> Result<PriceEntryDto> {
        let price = sqlx::query_as::<_, PriceEntry>(
            r#"
            UPDATE prices
            SET description = $2, price = $3
            WHERE id = $1
            RETURNING id, description, price
            "#,
        )
        .bind(id)
        .bind(&dto.description)
        .bind(dto.price)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Price entry '{}' not found", id)))?;

        Ok(price.into())
    }
}
