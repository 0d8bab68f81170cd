use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a catalog product
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub color: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    /// Store-relative key of the image, used to delete it on replace/remove.
    /// NULL for rows imported before keys were tracked.
    pub image_key: Option<String>,
}
