use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::info;

use super::domain::FormPayload;

pub const FORMS_PATH: &str = "/api/v1/forms";

/// Local stand-in for the hosted intake endpoint. Accepts any well-formed payload and keeps
/// nothing.
pub fn receiver_router() -> Router {
    Router::new()
        .route(FORMS_PATH, post(receive_handler))
        .route("/health", get(health_handler))
}

pub(crate) async fn receive_handler(Json(payload): Json<FormPayload>) -> Response {
    info!("form received");
    let message = format!("Form received for {}", payload.full_name);
    (StatusCode::OK, message).into_response()
}

pub(crate) async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
