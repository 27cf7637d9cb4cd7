use chrono::{DateTime, Utc};
/// Admin account model
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Admins are provisioned out of band; there is no self-registration path.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub admin_role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
