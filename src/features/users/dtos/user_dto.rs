use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::User;

/// Response DTO for a user account (never carries the password hash)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    pub is_active: bool,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            role: u.role,
            is_active: u.is_active,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(regex(
        path = "*crate::shared::validation::USERNAME_REGEX",
        message = "Username must start with a letter or underscore and contain only letters, digits and underscores"
    ))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

/// Partial update; unset fields keep their current values.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(regex(
        path = "*crate::shared::validation::USERNAME_REGEX",
        message = "Username must start with a letter or underscore and contain only letters, digits and underscores"
    ))]
    pub username: Option<String>,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    /// If true, only active accounts are returned
    #[serde(default)]
    pub active_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_rejects_empty_fields() {
        let dto = CreateUserDto {
            username: "".to_string(),
            password: "".to_string(),
            role: "".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn create_user_accepts_valid_fields() {
        let dto = CreateUserDto {
            username: "admin_user".to_string(),
            password: "s3cret-pass".to_string(),
            role: "admin".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn update_user_allows_partial_bodies() {
        let dto = UpdateUserDto {
            username: None,
            password: Some("new-pass".to_string()),
        };
        assert!(dto.validate().is_ok());
    }
}
