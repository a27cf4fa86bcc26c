use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use crate::models::common::ServiceCategory;
use crate::models::common::validate_service_category;
use crate::models::pagination::PaginationQuery;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub contact: String,
    pub service_category: ServiceCategory,
    pub sub_service: String,
    pub topic: String,
    pub deadline: String,
    pub budget: String,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public order form. Missing fields deserialize as empty strings so that
/// they are reported by validation rather than as a malformed body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(length(min = 10, message = "Please enter a valid WhatsApp number"))]
    pub contact: String,
    #[validate(custom = "validate_service_category")]
    pub service_category: String,
    #[validate(length(min = 1, message = "Please select a specific service type"))]
    pub sub_service: String,
    #[validate(length(min = 10, message = "Please provide more details about your project"))]
    pub topic: String,
    #[validate(length(min = 1, message = "Please specify a deadline"))]
    pub deadline: String,
    #[validate(length(min = 1, message = "Please specify your budget"))]
    pub budget: String,
}

/// A submission that passed validation, with the category resolved.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub name: String,
    pub contact: String,
    pub service_category: ServiceCategory,
    pub sub_service: String,
    pub topic: String,
    pub deadline: String,
    pub budget: String,
}

impl CreateOrderRequest {
    /// Strip surrounding whitespace so the length rules see what gets stored.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            contact: self.contact.trim().to_string(),
            service_category: self.service_category.trim().to_string(),
            sub_service: self.sub_service.trim().to_string(),
            topic: self.topic.trim().to_string(),
            deadline: self.deadline.trim().to_string(),
            budget: self.budget.trim().to_string(),
        }
    }
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = validator::ValidationErrors;

    fn try_from(request: CreateOrderRequest) -> Result<Self, Self::Error> {
        let request = request.trimmed();
        request.validate()?;
        let service_category = request
            .service_category
            .parse::<ServiceCategory>()
            .map_err(|_| {
                let mut errors = validator::ValidationErrors::new();
                errors.add(
                    "service_category",
                    validator::ValidationError::new("service_category"),
                );
                errors
            })?;

        Ok(NewOrder {
            name: request.name,
            contact: request.contact,
            service_category,
            sub_service: request.sub_service,
            topic: request.topic,
            deadline: request.deadline,
            budget: request.budget,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub status: Option<OrderStatus>,
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl OrderListQuery {
    pub fn pagination(&self) -> PaginationQuery {
        let defaults = PaginationQuery::default();
        let mut pagination = PaginationQuery {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        };
        pagination.validate();
        pagination
    }
}
