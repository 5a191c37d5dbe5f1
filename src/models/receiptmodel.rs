use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{clientmodel::Client, propertymodel::Property};

/// Immutable once issued; the only mutation is deletion. The stored
/// document lives in the blob store and is addressed by `receipt_url`.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Receipt {
    pub id: uuid::Uuid,
    pub client_id: Option<uuid::Uuid>,
    pub property_id: Option<uuid::Uuid>,
    pub amount: f64,
    pub receipt_number: String,
    pub receipt_url: String,
    pub issued_at: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReceiptWithRelations {
    #[serde(flatten)]
    pub receipt: Receipt,
    pub client: Option<Client>,
    pub property: Option<Property>,
}
