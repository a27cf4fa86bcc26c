use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use validator::ValidationError;

/// The two service lines, shared by portfolio projects and orders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub enum ServiceCategory {
    GraphicDesign,
    AcademicHelp,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 2] = [ServiceCategory::GraphicDesign, ServiceCategory::AcademicHelp];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::GraphicDesign => "graphicDesign",
            ServiceCategory::AcademicHelp => "academicHelp",
        }
    }
}

impl FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Invalid service category: {}", s))
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn validate_service_category(value: &str) -> Result<(), ValidationError> {
    value.parse::<ServiceCategory>().map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("service_category");
        error.message = Some(Cow::from("Please select a service category"));
        error
    })
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
