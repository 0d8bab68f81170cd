use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a user account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
}
