use crate::db::unique_constraint;
use crate::error::{AuthError, Result};
use crate::models::Patient;
use sqlx::PgPool;

/// Find a patient by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Patient>> {
    let patient = sqlx::query_as::<_, Patient>(
        r#"
        SELECT * FROM patients WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(patient)
}

/// Find a patient by mobile number
pub async fn find_by_mobile(pool: &PgPool, mobile: &str) -> Result<Option<Patient>> {
    let patient = sqlx::query_as::<_, Patient>(
        r#"
        SELECT * FROM patients WHERE mobile = $1
        "#,
    )
    .bind(mobile)
    .fetch_optional(pool)
    .await?;

    Ok(patient)
}

/// Insert a new patient
///
/// The UNIQUE constraints on `email` and `mobile` are the authoritative
/// duplicate check; a violation maps to the matching duplicate error even
/// when a concurrent registration slipped past the existence pre-checks.
pub async fn create(
    pool: &PgPool,
    email: &str,
    mobile: &str,
    first_name: &str,
    last_name: &str,
    password_hash: &str,
) -> Result<Patient> {
    let patient = sqlx::query_as::<_, Patient>(
        r#"
        INSERT INTO patients (id, email, mobile, first_name, last_name, password_hash, created_at, updated_at)
        VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(mobile)
    .bind(first_name)
    .bind(last_name)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| match unique_constraint(&e) {
        Some(constraint) if constraint.contains("mobile") => AuthError::DuplicateMobile,
        Some(_) => AuthError::DuplicateEmail,
        None => AuthError::from(e),
    })?;

    Ok(patient)
}
