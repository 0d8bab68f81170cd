use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::notifications::dtos::InquiryDto;
use crate::modules::mail::Mailer;
use crate::shared::multipart::FormData;
use crate::shared::types::ApiResponse;
use crate::shared::validation::into_validation_error;

/// Email a quotation PDF to a client
#[utoipa::path(
    post,
    path = "/api/notifications/quotation",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Email sent"),
        (status = 400, description = "Missing email, quote number or pdf"),
        (status = 500, description = "Relay rejected the message")
    ),
    tag = "notifications"
)]
pub async fn send_quotation_email(
    State(mailer): State<Arc<Mailer>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<()>>> {
    let form = FormData::read(multipart, "pdf").await?;
    let email = form.required("email")?;
    let quote_number = form.required("quote_number")?;
    let pdf = form.required_file()?;

    mailer
        .send_quotation_document(&email, &quote_number, pdf.data)
        .await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Quotation email sent".to_string()),
    )))
}

/// Deliver a contact-form inquiry to the business inbox
#[utoipa::path(
    post,
    path = "/api/notifications/inquiry",
    request_body = InquiryDto,
    responses(
        (status = 200, description = "Inquiry delivered"),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Relay rejected the message")
    ),
    tag = "notifications"
)]
pub async fn send_inquiry(
    State(mailer): State<Arc<Mailer>>,
    AppJson(dto): AppJson<InquiryDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate().map_err(into_validation_error)?;

    mailer
        .send_inquiry(
            &dto.first_name,
            &dto.last_name,
            &dto.email,
            dto.phone.as_deref(),
            &dto.message,
        )
        .await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Inquiry delivered".to_string()),
    )))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::core::config::SmtpConfig;
    use crate::features::notifications::routes;
    use crate::modules::mail::Mailer;

    fn test_server() -> TestServer {
        let mailer = Arc::new(
            Mailer::new(&SmtpConfig {
                host: "smtp.example.com".to_string(),
                port: 587,
                username: None,
                password: None,
                from_address: "noreply@vidrioalarte.com".to_string(),
                contact_inbox: "ventas@vidrioalarte.com".to_string(),
            })
            .expect("mailer should build"),
        );
        TestServer::new(routes::routes(mailer, 10 * 1024 * 1024)).expect("server should build")
    }

    #[tokio::test]
    async fn inquiry_with_invalid_email_is_rejected_before_any_send() {
        let server = test_server();

        let response = server
            .post("/api/notifications/inquiry")
            .json(&json!({
                "first_name": "Ana",
                "last_name": "Gómez",
                "email": "not-an-email",
                "message": "Hola"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn inquiry_with_missing_fields_is_rejected() {
        let server = test_server();

        let response = server
            .post("/api/notifications/inquiry")
            .json(&json!({
                "first_name": "Ana",
                "last_name": "",
                "email": "ana@example.com",
                "message": ""
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn quotation_email_requires_all_parts() {
        let server = test_server();

        // No email, quote_number or pdf at all
        let response = server
            .post("/api/notifications/quotation")
            .multipart(axum_test::multipart::MultipartForm::new())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
