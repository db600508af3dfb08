//! First-startup data seeding.
//!
//! Inserts the default status set when the `task_statuses` table is empty
//! and an admin user when none exists. Both are idempotent, so every startup
//! may call them unconditionally.

use taskhub_db::repositories::{StatusRepo, UserRepo};
use taskhub_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Default admin account email.
const ADMIN_EMAIL: &str = "hexlet@example.com";

/// Seed default statuses and the admin user if absent.
pub async fn seed_initial_data(pool: &DbPool) -> AppResult<()> {
    let seeded = StatusRepo::seed_defaults(pool).await?;
    if seeded > 0 {
        tracing::info!(count = seeded, "Seeded default task statuses");
    }

    ensure_admin_user(pool).await?;

    Ok(())
}

/// Create the admin user unless a user with the admin email already exists.
///
/// The password comes from `ADMIN_PASSWORD` (default `qwerty`, dev only --
/// set a real value in production).
async fn ensure_admin_user(pool: &DbPool) -> AppResult<()> {
    if UserRepo::find_by_email(pool, ADMIN_EMAIL).await?.is_some() {
        return Ok(());
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "qwerty".into());
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        ADMIN_EMAIL,
        Some("Mark"),
        Some("Wayne"),
        &password_hash,
    )
    .await?;

    tracing::info!(user_id = user.id, "Admin user created");

    Ok(())
}
