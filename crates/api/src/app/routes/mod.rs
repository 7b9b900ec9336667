use axum::Router;

pub mod auth;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new().nest("/auth", auth::router())
}
