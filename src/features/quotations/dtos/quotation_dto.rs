use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::quotations::models::{Quotation, QuotationStatus, QuotationWithOwner};
use crate::shared::multipart::FormData;
use crate::shared::validation::parse_price;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuotationResponseDto {
    pub id: Uuid,
    pub quote_number: String,
    pub client_name: String,
    pub client_email: String,
    #[schema(value_type = String, example = "1250.00")]
    pub total_price: Decimal,
    pub status: String,
    pub user_id: Uuid,
    /// Present in list views; None on create/update responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub document_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Quotation> for QuotationResponseDto {
    fn from(q: Quotation) -> Self {
        Self {
            id: q.id,
            quote_number: q.quote_number,
            client_name: q.client_name,
            client_email: q.client_email,
            total_price: q.total_price,
            status: q.status,
            user_id: q.user_id,
            username: None,
            document_url: q.document_url,
            created_at: q.created_at,
        }
    }
}

impl From<QuotationWithOwner> for QuotationResponseDto {
    fn from(q: QuotationWithOwner) -> Self {
        Self {
            id: q.id,
            quote_number: q.quote_number,
            client_name: q.client_name,
            client_email: q.client_email,
            total_price: q.total_price,
            status: q.status,
            user_id: q.user_id,
            username: Some(q.username),
            document_url: q.document_url,
            created_at: q.created_at,
        }
    }
}

/// Text fields of the quotation create/update form. Status defaults to
/// pending when absent.
#[derive(Debug)]
pub struct QuotationFields {
    pub quote_number: String,
    pub client_name: String,
    pub client_email: String,
    pub total_price: Decimal,
    pub status: QuotationStatus,
    pub user_id: Uuid,
}

impl QuotationFields {
    pub fn from_form(form: &FormData) -> Result<Self> {
        let status = match form.optional("status") {
            Some(raw) => QuotationStatus::from_str(&raw).map_err(AppError::Validation)?,
            None => QuotationStatus::Pending,
        };

        let user_id_raw = form.required("user_id")?;
        let user_id = Uuid::from_str(&user_id_raw)
            .map_err(|_| AppError::Validation(format!("'{}' is not a valid user id", user_id_raw)))?;

        Ok(Self {
            quote_number: form.required("quote_number")?,
            client_name: form.required("client_name")?,
            client_email: form.required("client_email")?,
            total_price: parse_price(&form.required("total_price")?)?,
            status,
            user_id,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusDto {
    pub status: String,
}
