use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "property_category", rename_all = "snake_case")]
#[serde(rename_all = "lowercase")]
pub enum PropertyCategory {
    Plot,
    House,
    Property,
}

impl PropertyCategory {
    pub fn to_str(&self) -> &str {
        match self {
            PropertyCategory::Plot => "plot",
            PropertyCategory::House => "house",
            PropertyCategory::Property => "property",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Property {
    pub id: uuid::Uuid,
    pub name: String,
    pub category: PropertyCategory,
    pub location: Option<String>,
    pub price: f64,
    pub description: Option<String>,
    pub short_description: Option<String>,
    /// Ordered list of image URLs.
    pub images: Option<Json<Vec<String>>>,
    pub virtual_tour_url: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
