use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use esports_portal::{build_router, db, AppError, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "esports_portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let pool = db::build_pool(&config.database_url)?;

    // keep serving if the database is unavailable; requests fail individually
    match db::run_migrations(&pool).await {
        Ok(()) => tracing::info!("connected to database"),
        Err(err) => tracing::error!(error = %err, "database connection error"),
    }

    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN not set, admin routes are unauthenticated");
    }

    let app = build_router(AppState::new(pool, config.admin_token.clone()));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("server running on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
