use deadpool_diesel::sqlite::{Manager, Pool};
use deadpool_diesel::Runtime;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::AppError;

// this embeds the migrations into the application binary
// the migration path is relative to the `CARGO_MANIFEST_DIR`
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

/// SQLite allows one writer at a time; a second pooled connection would get
/// `SQLITE_BUSY` instead of waiting. Requests queue on the pool instead.
pub const MAX_CONNECTIONS: usize = 1;

/// Builds the pool lazily; no connection is opened until the first `get`.
pub fn build_pool(database_url: &str) -> Result<Pool, AppError> {
    let manager = Manager::new(database_url, Runtime::Tokio1);
    Pool::builder(manager)
        .max_size(MAX_CONNECTIONS)
        .build()
        .map_err(AppError::pool)
}

pub async fn run_migrations(pool: &Pool) -> Result<(), AppError> {
    let conn = pool.get().await.map_err(AppError::pool)?;
    conn.interact(|conn| conn.run_pending_migrations(MIGRATIONS).map(|_| ()))
        .await
        .map_err(AppError::pool)?
        .map_err(|err| AppError::Migration(err.to_string()))
}
