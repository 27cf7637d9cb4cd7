use chrono::{DateTime, Utc};
/// Doctor account model
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// `password_hash` is nullable: accounts provisioned before hashed
/// credentials were enforced carry no hash at all, which is a distinct state
/// from a wrong password.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Doctor {
    pub id: Uuid,
    pub email: String,
    pub doctor_name: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub qualifications: String,
    pub experience_years: i32,
    pub phone: String,
    pub city: String,
    pub department_id: Option<Uuid>,
    pub is_approved: bool,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Doctor {
    /// Pending accounts must never receive a session token.
    pub fn is_pending(&self) -> bool {
        !self.is_approved
    }
}
