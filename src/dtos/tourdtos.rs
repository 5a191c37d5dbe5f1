use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::tourmodel::VirtualTourWithProperty;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SaveVirtualTourDto {
    pub property_id: Uuid,

    #[validate(length(min = 2, message = "Title is required"))]
    pub title: String,

    #[validate(url(message = "Enter a valid tour URL"))]
    pub tour_url: String,
}

/// Partial update: absent fields keep their stored value. The uploaded
/// asset is managed through the dedicated asset route.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateVirtualTourDto {
    pub property_id: Option<Uuid>,

    #[validate(length(min = 2, message = "Title is required"))]
    pub title: Option<String>,

    #[validate(url(message = "Enter a valid tour URL"))]
    pub tour_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VirtualTourListResponseDto {
    pub status: String,
    pub tours: Vec<VirtualTourWithProperty>,
    pub results: usize,
}
