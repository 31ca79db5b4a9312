use axum::http::StatusCode;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use serde_json::json;

use saddlebook_core::DomainError;
use saddlebook_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "ledger storage failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        DomainError::Guard(msg) => json_error(StatusCode::BAD_REQUEST, "guard_rejected", msg),
    }
}

pub fn task_failure_to_response(err: tokio::task::JoinError) -> axum::response::Response {
    tracing::error!(error = %err, "ledger operation did not complete");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "ledger operation failed")
}

/// Malformed request bodies are the client's fault: always 400.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
            "code": code,
        })),
    )
        .into_response()
}
