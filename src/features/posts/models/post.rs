use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a blog post
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub image_key: Option<String>,
    pub created_at: DateTime<Utc>,
}
