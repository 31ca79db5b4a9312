use std::sync::Arc;

use axum::{Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::get};

use crate::app::dto;
use crate::app::services::{self, AppServices};

pub fn router() -> Router {
    Router::new().route("/total", get(get_total))
}

pub async fn get_total(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services::run(&services, |s| s.cash_summary()).await {
        Ok(summary) => (StatusCode::OK, Json(dto::cash_summary_to_json(summary))).into_response(),
        Err(resp) => resp,
    }
}
