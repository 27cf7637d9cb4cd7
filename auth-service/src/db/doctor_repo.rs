use crate::db::unique_constraint;
use crate::error::{AuthError, Result};
use crate::models::Doctor;
use sqlx::PgPool;
use uuid::Uuid;

/// Find a doctor by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Doctor>> {
    let doctor = sqlx::query_as::<_, Doctor>(
        r#"
        SELECT * FROM doctors WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(doctor)
}

/// Insert a new doctor in the pending state
///
/// New doctors start with `is_approved = false, is_available = false` and
/// stay there until an admin approves them out of band.
#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    email: &str,
    doctor_name: &str,
    password_hash: &str,
    qualifications: &str,
    experience_years: i32,
    phone: &str,
    city: &str,
    department_id: Option<Uuid>,
) -> Result<Doctor> {
    let doctor = sqlx::query_as::<_, Doctor>(
        r#"
        INSERT INTO doctors (id, email, doctor_name, password_hash, qualifications, experience_years,
                             phone, city, department_id, is_approved, is_available, created_at, updated_at)
        VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, $7, $8, false, false, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(doctor_name)
    .bind(password_hash)
    .bind(qualifications)
    .bind(experience_years)
    .bind(phone)
    .bind(city)
    .bind(department_id)
    .fetch_one(pool)
    .await
    .map_err(|e| match unique_constraint(&e) {
        Some(_) => AuthError::DuplicateEmail,
        None => AuthError::from(e),
    })?;

    Ok(doctor)
}
