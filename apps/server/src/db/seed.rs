//! Idempotent first-run seeding.

use sqlx::PgPool;

use crate::{Error, Result};

/// Seed default clinics and an administrator account when the database is
/// empty. `admin_password_hash` is the already-hashed initial password.
pub async fn seed(pool: &PgPool, admin_password_hash: &str) -> Result<()> {
    seed_clinics(pool).await?;
    seed_admin(pool, admin_password_hash).await?;
    Ok(())
}

async fn seed_clinics(pool: &PgPool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clinics")
        .fetch_one(pool)
        .await
        .map_err(Error::Database)?;
    if count > 0 {
        return Ok(());
    }

    for name in ["Umum", "Gigi", "Anak"] {
        sqlx::query("INSERT INTO clinics (name, status) VALUES ($1, 'active')")
            .bind(name)
            .execute(pool)
            .await
            .map_err(Error::Database)?;
    }

    tracing::info!("Seeded default clinics");
    Ok(())
}

async fn seed_admin(pool: &PgPool, password_hash: &str) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff")
        .fetch_one(pool)
        .await
        .map_err(Error::Database)?;
    if count > 0 {
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO staff (username, name, status, role, password_hash, must_change_password)
         VALUES ('admin', 'Administrator', 'active', 'admin', $1, TRUE)",
    )
    .bind(password_hash)
    .execute(pool)
    .await
    .map_err(Error::Database)?;

    tracing::info!("Seeded default administrator account");
    Ok(())
}
