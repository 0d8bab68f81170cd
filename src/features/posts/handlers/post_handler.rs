use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::features::posts::dtos::{PostFields, PostResponseDto};
use crate::features::posts::services::PostService;
use crate::shared::multipart::FormData;
use crate::shared::types::ApiResponse;

/// List blog posts, newest first
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "List of posts", body = ApiResponse<Vec<PostResponseDto>>),
    ),
    tag = "posts"
)]
pub async fn list_posts(
    State(service): State<Arc<PostService>>,
) -> Result<Json<ApiResponse<Vec<PostResponseDto>>>> {
    let posts = service.list().await?;
    Ok(Json(ApiResponse::success(Some(posts), None)))
}

/// Create a post from a multipart form with an `image` file
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Post created", body = ApiResponse<PostResponseDto>),
        (status = 400, description = "Missing field or image")
    ),
    tag = "posts"
)]
pub async fn create_post(
    State(service): State<Arc<PostService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PostResponseDto>>)> {
    let form = FormData::read(multipart, "image").await?;
    let fields = PostFields::from_form(&form)?;
    let image = form.required_file()?;

    let post = service.create(fields, image).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(post),
            Some("Post created".to_string()),
        )),
    ))
}

/// Update a post; the `image` file part is optional
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Post updated", body = ApiResponse<PostResponseDto>),
        (status = 404, description = "Post not found")
    ),
    tag = "posts"
)]
pub async fn update_post(
    State(service): State<Arc<PostService>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<PostResponseDto>>> {
    let form = FormData::read(multipart, "image").await?;
    let fields = PostFields::from_form(&form)?;

    let post = service.update(id, fields, form.file).await?;
    Ok(Json(ApiResponse::success(
        Some(post),
        Some("Post updated".to_string()),
    )))
}

/// Delete a post and release its image
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 404, description = "Post not found")
    ),
    tag = "posts"
)]
pub async fn delete_post(
    State(service): State<Arc<PostService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Post deleted".to_string()),
    )))
}
