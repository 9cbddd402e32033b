#![allow(dead_code)]

use esports_portal::{build_router, client::ApiClient, db, AppState};
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub client: ApiClient,
    pub http: reqwest::Client,
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_admin_token(None).await
}

/// Serves the real router on an ephemeral port over a fresh, migrated SQLite
/// file that lives as long as the returned `TestApp`.
pub async fn spawn_app_with_admin_token(admin_token: Option<&str>) -> TestApp {
    serve(admin_token, true).await
}

/// Same as `spawn_app`, but the schema is never created, as after a failed
/// startup migration.
pub async fn spawn_unmigrated_app() -> TestApp {
    serve(None, false).await
}

async fn serve(admin_token: Option<&str>, migrate: bool) -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let database_url = dir.path().join("portal.db").to_string_lossy().into_owned();

    let pool = db::build_pool(&database_url).expect("build pool");
    if migrate {
        db::run_migrations(&pool).await.expect("run migrations");
    }

    let app = build_router(AppState::new(pool, admin_token.map(str::to_string)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let address = format!("http://{}", listener.local_addr().expect("local addr"));
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    TestApp {
        client: ApiClient::new(address.clone()),
        http: reqwest::Client::new(),
        address,
        _dir: dir,
    }
}
