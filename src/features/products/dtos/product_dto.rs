use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::products::models::Product;
use crate::shared::multipart::FormData;
use crate::shared::validation::parse_price;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub color: String,
    #[schema(value_type = String, example = "149.90")]
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            color: p.color,
            price: p.price,
            category: p.category,
            image_url: p.image_url,
        }
    }
}

/// Text fields of the product create/update form.
#[derive(Debug)]
pub struct ProductFields {
    pub title: String,
    pub description: String,
    pub color: String,
    pub price: Decimal,
    pub category: String,
}

impl ProductFields {
    /// Extract and validate the text fields from a multipart form.
    pub fn from_form(form: &FormData) -> Result<Self> {
        Ok(Self {
            title: form.required("title")?,
            description: form.required("description")?,
            color: form.required("color")?,
            price: parse_price(&form.required("price")?)?,
            category: form.required("category")?,
        })
    }
}
