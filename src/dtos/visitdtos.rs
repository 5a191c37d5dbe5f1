use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dtos::clientdtos::validate_phone;
use crate::models::visitmodel::{SiteVisitWithRelations, VisitStatus};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ScheduleSiteVisitDto {
    pub client_id: Uuid,
    pub property_id: Uuid,
    pub scheduled_date: DateTime<Utc>,
    pub status: VisitStatus,
    pub notes: Option<String>,
}

/// Partial update: absent fields keep their stored value. Status moves
/// freely between the three values, there are no transition guards.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSiteVisitDto {
    pub client_id: Option<Uuid>,
    pub property_id: Option<Uuid>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub status: Option<VisitStatus>,
    pub notes: Option<String>,
}

/// Public booking form on a property page; the client is resolved from
/// the contact fields before the visit row is created.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SiteVisitRequestDto {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Enter a valid email")
    )]
    pub email: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    pub scheduled_date: DateTime<Utc>,

    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SiteVisitListResponseDto {
    pub status: String,
    pub visits: Vec<SiteVisitWithRelations>,
    pub results: usize,
}
