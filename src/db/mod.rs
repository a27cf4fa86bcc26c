pub mod admins;
pub mod orders;
pub mod projects;
pub mod settings;
pub mod stats;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::core::config::DatabaseConfig;

pub fn connect_lazy(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    Ok(SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy_with(config.connect()?))
}

/// A single-connection in-memory database. The connection is never recycled,
/// since that would drop the database with it.
pub async fn in_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = in_memory_pool().await.expect("Failed to open in-memory database");
    migrate(&pool).await.expect("Failed to migrate in-memory database");
    pool
}
