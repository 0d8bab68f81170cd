use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::catalog::models::{CatalogEntry, Category, Frame, PriceEntry};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntryDto {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl From<CatalogEntry> for CatalogEntryDto {
    fn from(e: CatalogEntry) -> Self {
        Self {
            id: e.id,
            name: e.name,
            description: e.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FrameDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "89.50")]
    pub price: Decimal,
}

impl From<Frame> for FrameDto {
    fn from(f: Frame) -> Self {
        Self {
            id: f.id,
            name: f.name,
            description: f.description,
            price: f.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PriceEntryDto {
    pub id: i32,
    pub description: String,
    #[schema(value_type = String, example = "35.00")]
    pub price: Decimal,
}

impl From<PriceEntry> for PriceEntryDto {
    fn from(p: PriceEntry) -> Self {
        Self {
            id: p.id,
            description: p.description,
            price: p.price,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePriceDto {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[schema(value_type = String, example = "42.00")]
    pub price: Decimal,
}
