use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::Result;
use crate::features::posts::models::Post;
use crate::shared::multipart::FormData;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostResponseDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponseDto {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            category: p.category,
            image_url: p.image_url,
            created_at: p.created_at,
        }
    }
}

/// Text fields of the post create/update form.
#[derive(Debug)]
pub struct PostFields {
    pub title: String,
    pub description: String,
    pub category: String,
}

impl PostFields {
    pub fn from_form(form: &FormData) -> Result<Self> {
        Ok(Self {
            title: form.required("title")?,
            description: form.required("description")?,
            category: form.required("category")?,
        })
    }
}
