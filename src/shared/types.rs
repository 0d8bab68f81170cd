use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>) -> Self {
        Self {
            success: true,
            data,
            message,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let resp = ApiResponse::success(Some(42), Some("ok".to_string()));
        assert!(resp.success);
        assert_eq!(resp.data, Some(42));
        assert!(resp.errors.is_none());
    }

    #[test]
    fn error_envelope_shape() {
        let resp = ApiResponse::<()>::error(Some("bad".to_string()), Some(vec!["bad".to_string()]));
        assert!(!resp.success);
        assert!(resp.data.is_none());
        assert_eq!(resp.errors.as_deref(), Some(&["bad".to_string()][..]));
    }
}
