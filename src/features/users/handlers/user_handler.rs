use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::users::dtos::{
    CreateUserDto, ListUsersQuery, LoginDto, UpdateUserDto, UserResponseDto,
};
use crate::features::users::services::UserService;
use crate::shared::types::ApiResponse;
use crate::shared::validation::into_validation_error;

/// Authenticate with username and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Credentials accepted", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unknown username or wrong password"),
        (status = 403, description = "Account is deactivated")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<LoginDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate().map_err(into_validation_error)?;
    let user = service.login(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(user),
        Some("Login successful".to_string()),
    )))
}

/// List user accounts
#[utoipa::path(
    get,
    path = "/api/users",
    params(
        ("active_only" = Option<bool>, Query, description = "Only return active accounts")
    ),
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<UserResponseDto>>),
    ),
    tag = "users"
)]
pub async fn list_users(
    State(service): State<Arc<UserService>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let users = service.list(query.active_only).await?;
    Ok(Json(ApiResponse::success(Some(users), None)))
}

/// Get a user by username
#[utoipa::path(
    get,
    path = "/api/users/{username}",
    params(
        ("username" = String, Path, description = "Username, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserResponseDto>),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(service): State<Arc<UserService>>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user = service.find_by_username(&username).await?;
    Ok(Json(ApiResponse::success(Some(user), None)))
}

/// Create a new user account
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Username already taken")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<CreateUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate().map_err(into_validation_error)?;
    let user = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(user),
            Some("User created".to_string()),
        )),
    ))
}

/// Update a user's username and/or password
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserResponseDto>),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already taken")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate().map_err(into_validation_error)?;
    let user = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(user),
        Some("User updated".to_string()),
    )))
}

/// Delete (or deactivate) a user account
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User removed"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.remove(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("User removed".to_string()),
    )))
}
