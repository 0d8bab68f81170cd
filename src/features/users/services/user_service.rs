use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::UserDeletePolicy;
use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{CreateUserDto, LoginDto, UpdateUserDto, UserResponseDto};
use crate::features::users::models::User;
use crate::features::users::password::{hash_password, verify_password};

/// Service for user account operations
pub struct UserService {
    pool: PgPool,
    delete_policy: UserDeletePolicy,
}

impl UserService {
    pub fn new(pool: PgPool, delete_policy: UserDeletePolicy) -> Self {
        Self {
            pool,
            delete_policy,
        }
    }

    /// List user accounts, optionally filtered to active ones
    pub async fn list(&self, active_only: bool) -> Result<Vec<UserResponseDto>> {
        let users = if active_only {
            sqlx::query_as::<_, User>(
                r#"
                SELECT id, username, password_hash, role, is_active
                FROM users
                WHERE is_active = TRUE
                ORDER BY username
                "#,
            )
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, User>(
                r#"
                SELECT id, username, password_hash, role, is_active
                FROM users
                ORDER BY username
                "#,
            )
            .fetch_all(&self.pool)
            .await?
        };

        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    /// Look up a single account by username (case-insensitive)
    pub async fn find_by_username(&self, username: &str) -> Result<UserResponseDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role, is_active
            FROM users
            WHERE LOWER(username) = LOWER($1)
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        user.map(|u| u.into())
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))
    }

    /// Verify a username/password pair.
    ///
    /// Unknown usernames and wrong passwords both map to the same 401 so the
    /// response does not reveal which accounts exist. Deactivated accounts
    /// are rejected with 403 even when the password is correct.
    pub async fn login(&self, dto: LoginDto) -> Result<UserResponseDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role, is_active
            FROM users
            WHERE LOWER(username) = LOWER($1)
            "#,
        )
        .bind(&dto.username)
        .fetch_optional(&self.pool)
        .await?;

        let user = user.ok_or_else(|| {
            AppError::InvalidCredentials("Invalid username or password".to_string())
        })?;

        let matches = verify_password(&dto.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !matches {
            return Err(AppError::InvalidCredentials(
                "Invalid username or password".to_string(),
            ));
        }

        if !user.is_active {
            return Err(AppError::Forbidden("Account is deactivated".to_string()));
        }

        Ok(user.into())
    }

    /// Create a new active account with a freshly hashed password
    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        let password_hash = hash_password(&dto.password)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash, role, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING id, username, password_hash, role, is_active
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&dto.username)
        .bind(&password_hash)
        .bind(&dto.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Username '{}' is already taken", dto.username))
            }
            _ => AppError::Database(e),
        })?;

        Ok(user.into())
    }

    /// Update username and/or password; omitted fields keep their values
    pub async fn update(&self, id: Uuid, dto: UpdateUserDto) -> Result<UserResponseDto> {
        if dto.username.is_none() && dto.password.is_none() {
            return Err(AppError::Validation(
                "At least one of username or password is required".to_string(),
            ));
        }

        let current = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role, is_active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", id)))?;

        let username = dto.username.unwrap_or(current.username);
        let password_hash = match dto.password {
            Some(plain) => hash_password(&plain)
                .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?,
            None => current.password_hash,
        };

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2, password_hash = $3
            WHERE id = $1
            RETURNING id, username, password_hash, role, is_active
            "#,
        )
        .bind(id)
        .bind(&username)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Username '{}' is already taken", username))
            }
            _ => AppError::Database(e),
        })?;

        Ok(user.into())
    }

    /// Remove an account according to the configured delete policy
    pub async fn remove(&self, id: Uuid) -> Result<()> {
        let result = match self.delete_policy {
            UserDeletePolicy::Deactivate => {
                sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
            UserDeletePolicy::HardDelete => sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?,
        };

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User '{}' not found", id)));
        }

        Ok(())
    }
}

// Database-backed tests. Each one gets a throwaway database with the
// migrations applied; start Postgres, set DATABASE_URL, then run with
// `cargo test -- --ignored`.
#[cfg(test)]
mod tests {
    use super::*;

    fn service(pool: PgPool) -> UserService {
        UserService::new(pool, UserDeletePolicy::Deactivate)
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres instance via DATABASE_URL"]
    async fn username_lookup_ignores_case(pool: PgPool) {
        let service = service(pool);
        service
            .create(CreateUserDto {
                username: "Admin".to_string(),
                password: "s3cret-pass".to_string(),
                role: "admin".to_string(),
            })
            .await
            .expect("create should succeed");

        for lookup in ["admin", "ADMIN", "Admin"] {
            let found = service
                .find_by_username(lookup)
                .await
                .expect("lookup should succeed");
            assert_eq!(found.username, "Admin");
        }
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres instance via DATABASE_URL"]
    async fn removing_unknown_user_is_not_found(pool: PgPool) {
        let service = service(pool);
        let err = service
            .remove(Uuid::new_v4())
            .await
            .expect_err("unknown id should fail");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres instance via DATABASE_URL"]
    async fn deactivated_account_cannot_log_in(pool: PgPool) {
        let service = service(pool);
        let created = service
            .create(CreateUserDto {
                username: "ventas".to_string(),
                password: "s3cret-pass".to_string(),
                role: "staff".to_string(),
            })
            .await
            .expect("create should succeed");

        service.remove(created.id).await.expect("remove should succeed");

        let err = service
            .login(LoginDto {
                username: "ventas".to_string(),
                password: "s3cret-pass".to_string(),
            })
            .await
            .expect_err("deactivated account should be rejected");
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
