use deadpool_diesel::sqlite::Pool;
use diesel::{QueryResult, SqliteConnection};

use crate::error::AppError;

/// Shared request context. Cloning is cheap: the pool is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: Pool,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(pool: Pool, admin_token: Option<String>) -> Self {
        Self { pool, admin_token }
    }

    /// Runs one blocking diesel statement on a pooled connection.
    pub async fn interact<F, T>(&self, query: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.pool.get().await.map_err(AppError::pool)?;
        conn.interact(query)
            .await
            .map_err(AppError::pool)?
            .map_err(AppError::from)
    }
}
