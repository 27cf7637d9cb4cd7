use crate::error::Result;
use crate::models::Admin;
use sqlx::PgPool;

/// Find an admin by email
///
/// Admins are provisioned out of band; this store is read-only for the auth
/// service.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Admin>> {
    let admin = sqlx::query_as::<_, Admin>(
        r#"
        SELECT * FROM admins WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(admin)
}
