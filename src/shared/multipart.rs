use std::collections::HashMap;

use axum::extract::Multipart;

use crate::core::error::{AppError, Result};

/// A file part read out of a multipart form.
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// Text fields plus at most one file part from a multipart/form-data body.
///
/// The media-attached record endpoints (products, quotations, posts) and the
/// quotation-mail endpoint all accept the same shape: a handful of text fields
/// and a single file under a well-known field name.
pub struct FormData {
    fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl FormData {
    /// Drain a multipart body, collecting text fields and the file part named
    /// `file_field`. Unknown fields are ignored.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self> {
        let mut fields = HashMap::new();
        let mut file: Option<UploadedFile> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::debug!("Failed to read multipart field: {}", e);
            AppError::BadRequest(format!("Failed to read multipart data: {}", e))
        })? {
            let field_name = field.name().unwrap_or("").to_string();

            if field_name == file_field {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    tracing::debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file = Some(UploadedFile {
                    data: data.to_vec(),
                    filename,
                    content_type,
                });
            } else {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!(
                        "Failed to read field '{}': {}",
                        field_name, e
                    ))
                })?;
                fields.insert(field_name, text);
            }
        }

        Ok(Self { fields, file })
    }

    /// A required text field; empty or absent is a validation error.
    pub fn required(&self, name: &str) -> Result<String> {
        match self.fields.get(name).map(|s| s.trim()) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(AppError::Validation(format!(
                "Field '{}' is required",
                name
            ))),
        }
    }

    /// An optional text field; empty strings count as absent.
    pub fn optional(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    }

    /// The file part; absence is a validation error.
    pub fn required_file(self) -> Result<UploadedFile> {
        self.file
            .ok_or_else(|| AppError::Validation("A file is required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(fields: &[(&str, &str)]) -> FormData {
        FormData {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            file: None,
        }
    }

    #[test]
    fn required_rejects_missing_and_empty() {
        let form = form_with(&[("title", "Panel A"), ("color", "  ")]);
        assert_eq!(form.required("title").unwrap(), "Panel A");
        assert!(form.required("color").is_err());
        assert!(form.required("price").is_err());
    }

    #[test]
    fn optional_treats_empty_as_absent() {
        let form = form_with(&[("phone", ""), ("message", "hello")]);
        assert_eq!(form.optional("phone"), None);
        assert_eq!(form.optional("message").as_deref(), Some("hello"));
    }

    #[test]
    fn required_file_errors_without_file() {
        let form = form_with(&[]);
        assert!(form.required_file().is_err());
    }
}
