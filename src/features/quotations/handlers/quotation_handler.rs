use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::quotations::dtos::{
    QuotationFields, QuotationResponseDto, UpdateStatusDto,
};
use crate::features::quotations::models::QuotationStatus;
use crate::features::quotations::services::QuotationService;
use crate::shared::multipart::FormData;
use crate::shared::types::ApiResponse;

/// List quotations with their owner's username, newest first
#[utoipa::path(
    get,
    path = "/api/quotations",
    responses(
        (status = 200, description = "List of quotations", body = ApiResponse<Vec<QuotationResponseDto>>),
    ),
    tag = "quotations"
)]
pub async fn list_quotations(
    State(service): State<Arc<QuotationService>>,
) -> Result<Json<ApiResponse<Vec<QuotationResponseDto>>>> {
    let quotations = service.list().await?;
    Ok(Json(ApiResponse::success(Some(quotations), None)))
}

/// Create a quotation from a multipart form with a `pdf` file
#[utoipa::path(
    post,
    path = "/api/quotations",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Quotation created", body = ApiResponse<QuotationResponseDto>),
        (status = 400, description = "Missing field or document")
    ),
    tag = "quotations"
)]
pub async fn create_quotation(
    State(service): State<Arc<QuotationService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<QuotationResponseDto>>)> {
    let form = FormData::read(multipart, "pdf").await?;
    let fields = QuotationFields::from_form(&form)?;
    let document = form.required_file()?;

    let quotation = service.create(fields, document).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(quotation),
            Some("Quotation created".to_string()),
        )),
    ))
}

/// Update a quotation; the `pdf` file part is optional
#[utoipa::path(
    put,
    path = "/api/quotations/{id}",
    params(
        ("id" = Uuid, Path, description = "Quotation id")
    ),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Quotation updated", body = ApiResponse<QuotationResponseDto>),
        (status = 404, description = "Quotation not found")
    ),
    tag = "quotations"
)]
pub async fn update_quotation(
    State(service): State<Arc<QuotationService>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<QuotationResponseDto>>> {
    let form = FormData::read(multipart, "pdf").await?;
    let fields = QuotationFields::from_form(&form)?;

    let quotation = service.update(id, fields, form.file).await?;
    Ok(Json(ApiResponse::success(
        Some(quotation),
        Some("Quotation updated".to_string()),
    )))
}

/// Set a quotation's status
#[utoipa::path(
    patch,
    path = "/api/quotations/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Quotation id")
    ),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Quotation not found")
    ),
    tag = "quotations"
)]
pub async fn update_quotation_status(
    State(service): State<Arc<QuotationService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateStatusDto>,
) -> Result<Json<ApiResponse<()>>> {
    let status = QuotationStatus::from_str(&dto.status).map_err(AppError::Validation)?;

    service.patch_status(id, status).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Status updated".to_string()),
    )))
}

/// Delete a quotation and release its document
#[utoipa::path(
    delete,
    path = "/api/quotations/{id}",
    params(
        ("id" = Uuid, Path, description = "Quotation id")
    ),
    responses(
        (status = 200, description = "Quotation deleted"),
        (status = 404, description = "Quotation not found")
    ),
    tag = "quotations"
)]
pub async fn delete_quotation(
    State(service): State<Arc<QuotationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Quotation deleted".to_string()),
    )))
}
