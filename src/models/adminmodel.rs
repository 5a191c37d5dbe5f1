use chrono::prelude::*;
use serde::{Deserialize, Serialize};

/// Back-office account. There is no self-service registration; rows are
/// provisioned with the `seed_admin` binary.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct AdminUser {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
