use rust_decimal::Decimal;
use sqlx::FromRow;

/// Read-mostly reference tables backing the public catalog pages.

#[derive(Debug, Clone, FromRow)]
pub struct CatalogEntry {
    pub id: i32,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Frame {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct PriceEntry {
    pub id: i32,
    pub description: String,
    pub price: Decimal,
}
