use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::products::dtos::{ProductFields, ProductResponseDto};
use crate::features::products::services::ProductService;
use crate::shared::multipart::FormData;
use crate::shared::types::ApiResponse;

/// List all products
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "List of products", body = ApiResponse<Vec<ProductResponseDto>>),
    ),
    tag = "products"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let products = service.list().await?;
    Ok(Json(ApiResponse::success(Some(products), None)))
}

/// List distinct product categories in use
#[utoipa::path(
    get,
    path = "/api/products/categories",
    responses(
        (status = 200, description = "Category names", body = ApiResponse<Vec<String>>),
    ),
    tag = "products"
)]
pub async fn list_product_categories(
    State(service): State<Arc<ProductService>>,
) -> Result<Json<ApiResponse<Vec<String>>>> {
    let categories = service.distinct_categories().await?;
    Ok(Json(ApiResponse::success(Some(categories), None)))
}

/// Create a product from a multipart form with an `image` file
#[utoipa::path(
    post,
    path = "/api/products",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Missing field or image")
    ),
    tag = "products"
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponseDto>>)> {
    let form = FormData::read(multipart, "image").await?;
    let fields = ProductFields::from_form(&form)?;
    let image = form.required_file()?;

    let product = service.create(fields, image).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(product),
            Some("Product created".to_string()),
        )),
    ))
}

/// Update a product; the `image` file part is optional
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product id")
    ),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponseDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn update_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let form = FormData::read(multipart, "image").await?;
    let fields = ProductFields::from_form(&form)?;

    let product = service.update(id, fields, form.file).await?;
    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product updated".to_string()),
    )))
}

/// Delete a product and release its image
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Product deleted".to_string()),
    )))
}
