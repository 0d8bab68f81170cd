use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Website contact-form inquiry
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InquiryDto {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    pub phone: Option<String>,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_inquiry() -> InquiryDto {
        InquiryDto {
            first_name: "Ana".to_string(),
            last_name: "Gómez".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            message: "Quisiera una cotización".to_string(),
        }
    }

    #[test]
    fn inquiry_without_phone_is_valid() {
        assert!(valid_inquiry().validate().is_ok());
    }

    #[test]
    fn inquiry_rejects_bad_email() {
        let mut dto = valid_inquiry();
        dto.email = "not-an-email".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn inquiry_rejects_empty_message() {
        let mut dto = valid_inquiry();
        dto.message = "".to_string();
        assert!(dto.validate().is_err());
    }
}
