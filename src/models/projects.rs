use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::common::{validate_service_category, ServiceCategory};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub title_en: Option<String>,
    pub description: String,
    pub description_en: Option<String>,
    pub category: ServiceCategory,
    pub image_url: String,
    pub featured: bool,
    #[serde(rename = "order")]
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub title_en: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub description_en: Option<String>,
    #[validate(custom = "validate_service_category")]
    pub category: String,
    #[validate(length(min = 1, message = "Image is required"))]
    pub image_url: String,
    pub featured: Option<bool>,
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    pub title_en: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    pub description_en: Option<String>,
    #[validate(custom = "validate_service_category")]
    pub category: Option<String>,
    #[validate(length(min = 1, message = "Image is required"))]
    pub image_url: Option<String>,
    pub featured: Option<bool>,
    pub order: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ProjectListQuery {
    pub category: Option<ServiceCategory>,
    pub featured: Option<bool>,
}

fn trim_owned(value: String) -> String {
    value.trim().to_string()
}

impl CreateProjectRequest {
    /// Strip surrounding whitespace so the length rules see what gets stored.
    pub fn trimmed(self) -> Self {
        Self {
            title: trim_owned(self.title),
            title_en: self.title_en.map(trim_owned),
            description: trim_owned(self.description),
            description_en: self.description_en.map(trim_owned),
            category: trim_owned(self.category),
            image_url: trim_owned(self.image_url),
            ..self
        }
    }
}

impl UpdateProjectRequest {
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.map(trim_owned),
            title_en: self.title_en.map(trim_owned),
            description: self.description.map(trim_owned),
            description_en: self.description_en.map(trim_owned),
            category: self.category.map(trim_owned),
            image_url: self.image_url.map(trim_owned),
            ..self
        }
    }
}

/// Blank English variants are stored as absent.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
