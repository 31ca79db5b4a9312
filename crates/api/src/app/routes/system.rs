use axum::http::StatusCode;

/// Liveness probe; does not touch the ledger store.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
