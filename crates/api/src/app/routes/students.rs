use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use saddlebook_core::RecordIndex;

use crate::app::services::{self, AppServices};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_students))
        .route("/register", post(register_student))
        .route("/:index", get(get_student).delete(delete_student))
        .route("/:index/decrease-credit", post(decrease_credit))
        .route("/:index/mark-paid", post(mark_paid))
}

fn parse_index(raw: &str) -> Result<RecordIndex, axum::response::Response> {
    raw.parse::<RecordIndex>()
        .map_err(errors::domain_error_to_response)
}

pub async fn list_students(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services::run(&services, |s| s.list()).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(resp) => resp,
    }
}

pub async fn register_student(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RegisterStudentRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services::run(&services, move |s| s.register(body.into())).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "student registered",
                "data": record,
            })),
        )
            .into_response(),
        Err(resp) => resp,
    }
}

pub async fn get_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(index): Path<String>,
) -> axum::response::Response {
    let index = match parse_index(&index) {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match services::run(&services, move |s| s.get(index)).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(resp) => resp,
    }
}

pub async fn delete_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(index): Path<String>,
) -> axum::response::Response {
    let index = match parse_index(&index) {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match services::run(&services, move |s| s.delete(index)).await {
        Ok(record) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "student record deleted",
                "deleted_student": record,
            })),
        )
            .into_response(),
        Err(resp) => resp,
    }
}

pub async fn decrease_credit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(index): Path<String>,
) -> axum::response::Response {
    let index = match parse_index(&index) {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match services::run(&services, move |s| s.decrease_credit(index)).await {
        Ok(remaining) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "lesson credit used",
                "ders_hakki": remaining,
            })),
        )
            .into_response(),
        Err(resp) => resp,
    }
}

pub async fn mark_paid(
    Extension(services): Extension<Arc<AppServices>>,
    Path(index): Path<String>,
) -> axum::response::Response {
    let index = match parse_index(&index) {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match services::run(&services, move |s| s.mark_paid(index)).await {
        Ok(record) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "payment recorded",
                "data": record,
            })),
        )
            .into_response(),
        Err(resp) => resp,
    }
}
