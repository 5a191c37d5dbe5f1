use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::propertymodel::Property;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct VirtualTour {
    pub id: uuid::Uuid,
    pub property_id: Option<uuid::Uuid>,
    pub title: String,
    pub tour_url: String,
    /// Public URL of an uploaded media file, set through the asset route.
    pub asset_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VirtualTourWithProperty {
    #[serde(flatten)]
    pub tour: VirtualTour,
    pub property: Option<Property>,
}
