use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{clientmodel::Client, propertymodel::Property};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "visit_status", rename_all = "snake_case")]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl VisitStatus {
    pub fn to_str(&self) -> &str {
        match self {
            VisitStatus::Upcoming => "upcoming",
            VisitStatus::Completed => "completed",
            VisitStatus::Cancelled => "cancelled",
        }
    }
}

/// References are advisory: deleting the client or property nulls the
/// pointer instead of cascading, so old visits keep their history.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct SiteVisit {
    pub id: uuid::Uuid,
    pub client_id: Option<uuid::Uuid>,
    pub property_id: Option<uuid::Uuid>,
    pub scheduled_date: DateTime<Utc>,
    pub status: VisitStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SiteVisitWithRelations {
    #[serde(flatten)]
    pub visit: SiteVisit,
    pub client: Option<Client>,
    pub property: Option<Property>,
}
