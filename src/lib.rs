//! Registration backend for an esports tournament organization, plus the
//! client-side pieces that drive it: a typed API client, the team
//! registration flow and the admin payment-tracking views.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod client;
pub mod config;
pub mod contact;
pub mod db;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod registration;
pub mod schema;
pub mod state;
pub mod tracking;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/admin", post(handlers::create_admin))
        .route("/api/admins", get(handlers::list_admins))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin_token,
        ));

    Router::new()
        .route("/api/register", post(handlers::create_user))
        .route("/api/users", get(handlers::list_users))
        .route("/api/payment", post(handlers::create_payment))
        .route("/api/payments", get(handlers::list_payments))
        .route("/api/register-event", post(handlers::create_registration))
        .route("/api/registrations", get(handlers::list_registrations))
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
