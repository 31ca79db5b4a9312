use axum::Router;

pub mod cashier;
pub mod students;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/students", students::router())
        .nest("/cashier", cashier::router())
}
