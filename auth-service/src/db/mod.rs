/// Repository functions over the identity stores
///
/// Free functions over `&PgPool`, one module per store. Callers wrap every
/// call in [`with_store_timeout`] so a stalled store surfaces as
/// `StoreTimeout` instead of hanging the request or masquerading as a failed
/// login.
pub mod admin_repo;
pub mod doctor_repo;
pub mod patient_repo;

use std::future::Future;
use std::time::Duration;

use crate::error::{AuthError, Result};

/// Bound a store operation with a timeout.
pub async fn with_store_timeout<T, F>(timeout: Duration, op: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, op).await {
        Ok(result) => result,
        Err(_) => Err(AuthError::StoreTimeout),
    }
}

/// Name of the violated unique constraint, when `err` is a unique violation.
pub(crate) fn unique_constraint(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Some(db_err.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}
