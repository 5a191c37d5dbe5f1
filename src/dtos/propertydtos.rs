use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::propertymodel::{Property, PropertyCategory};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SavePropertyDto {
    #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
    pub name: String,

    pub category: PropertyCategory,

    pub location: Option<String>,

    #[validate(range(min = 0.0, message = "Price must be zero or positive"))]
    pub price: f64,

    pub description: Option<String>,
    pub short_description: Option<String>,

    // Image URLs; uploads happen on the frontend's storage path, the API
    // stores addresses only.
    pub images: Option<Vec<String>>,

    #[validate(url(message = "Enter a valid tour URL"))]
    pub virtual_tour_url: Option<String>,

    pub is_featured: Option<bool>,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePropertyDto {
    #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
    pub name: Option<String>,

    pub category: Option<PropertyCategory>,

    pub location: Option<String>,

    #[validate(range(min = 0.0, message = "Price must be zero or positive"))]
    pub price: Option<f64>,

    pub description: Option<String>,
    pub short_description: Option<String>,
    pub images: Option<Vec<String>>,

    #[validate(url(message = "Enter a valid tour URL"))]
    pub virtual_tour_url: Option<String>,

    pub is_featured: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyListResponseDto {
    pub status: String,
    pub properties: Vec<Property>,
    pub results: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyResponseDto {
    pub status: String,
    pub data: Property,
}
