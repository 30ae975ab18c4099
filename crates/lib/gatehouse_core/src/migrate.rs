//! Database migration support.
//!
//! Embeds and runs SQL migrations from `gatehouse_core/migrations/`.

use sqlx::PgPool;

/// Run all embedded database migrations against the given pool.
///
/// Safe to run on every process start: already-applied migrations are
/// skipped, and the schema statements themselves are `IF NOT EXISTS`.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
