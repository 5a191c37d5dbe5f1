use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// CRM record. Email is the de facto dedup key for find-or-create but
/// carries no unique constraint in storage; concurrent submissions may race.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Client {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Public URLs of uploaded documents, append-only through the API.
    pub documents: Option<Json<Vec<String>>>,
    pub purchase_history: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
