use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::catalog::dtos::{
    CatalogEntryDto, CategoryDto, FrameDto, PriceEntryDto, UpdatePriceDto,
};
use crate::features::catalog::services::CatalogService;
use crate::shared::types::ApiResponse;
use crate::shared::validation::into_validation_error;

/// List catalog entries
#[utoipa::path(
    get,
    path = "/api/catalog",
    responses(
        (status = 200, description = "Catalog entries", body = ApiResponse<Vec<CatalogEntryDto>>),
    ),
    tag = "catalog"
)]
pub async fn list_catalog_entries(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<ApiResponse<Vec<CatalogEntryDto>>>> {
    let entries = service.list_catalog_entries().await?;
    Ok(Json(ApiResponse::success(Some(entries), None)))
}

/// List frame offerings
#[utoipa::path(
    get,
    path = "/api/frames",
    responses(
        (status = 200, description = "Frames", body = ApiResponse<Vec<FrameDto>>),
    ),
    tag = "catalog"
)]
pub async fn list_frames(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<ApiResponse<Vec<FrameDto>>>> {
    let frames = service.list_frames().await?;
    Ok(Json(ApiResponse::success(Some(frames), None)))
}

/// List reference categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories", body = ApiResponse<Vec<CategoryDto>>),
    ),
    tag = "catalog"
)]
pub async fn list_categories(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>> {
    let categories = service.list_categories().await?;
    Ok(Json(ApiResponse::success(Some(categories), None)))
}

/// List the price table
#[utoipa::path(
    get,
    path = "/api/prices",
    responses(
        (status = 200, description = "Price entries", body = ApiResponse<Vec<PriceEntryDto>>),
    ),
    tag = "catalog"
)]
pub async fn list_prices(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<ApiResponse<Vec<PriceEntryDto>>>> {
    let prices = service.list_prices().await?;
    Ok(Json(ApiResponse::success(Some(prices), None)))
}

/// Update a price entry
#[utoipa::path(
    put,
    path = "/api/prices/{id}",
    params(
        ("id" = i32, Path, description = "Price entry id")
    ),
    request_body = UpdatePriceDto,
    responses(
        (status = 200, description = "Price updated", body = ApiResponse<PriceEntryDto>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Price entry not found")
    ),
    tag = "catalog"
)]
pub async fn update_price(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<i32>,
    AppJson(dto): AppJson<UpdatePriceDto>,
) -> Result<Json<ApiResponse<PriceEntryDto>>> {
    dto.validate().map_err(into_validation_error)?;
    if dto.price.is_sign_negative() {
        return Err(AppError::Validation(
            "Price must not be negative".to_string(),
        ));
    }

    let price = service.update_price(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(price),
        Some("Price updated".to_string()),
    )))
}
