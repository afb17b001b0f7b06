use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use intake_form::form::receiver::FORMS_PATH;
use intake_form::form::receiver_router;
use serde_json::json;
use std::sync::atomic::Ordering;

/// Development receiver plus readiness and metrics endpoints.
pub(crate) fn with_operational_routes() -> axum::Router {
    receiver_router()
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

/// 503 until the listener is bound; afterwards names the path forms should be posted to.
pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.readiness.load(Ordering::Acquire) {
        let body = json!({ "status": "ready", "forms": FORMS_PATH });
        (StatusCode::OK, Json(body))
    } else {
        let body = json!({ "status": "starting" });
        (StatusCode::SERVICE_UNAVAILABLE, Json(body))
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let exposition = state.metrics.render();
    ([(header::CONTENT_TYPE, PROMETHEUS_TEXT)], exposition)
}

const PROMETHEUS_TEXT: &str = "text/plain; version=0.0.4";

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router(ready: bool) -> axum::Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_operational_routes().layer(Extension(state))
    }

    async fn get(router: axum::Router, path: &str) -> axum::response::Response {
        router
            .oneshot(
                Request::get(path)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds")
    }

    async fn status_of(router: axum::Router, path: &str) -> StatusCode {
        get(router, path).await.status()
    }

    #[tokio::test]
    async fn readiness_follows_the_flag() {
        assert_eq!(status_of(router(true), "/ready").await, StatusCode::OK);
        assert_eq!(
            status_of(router(false), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn ready_body_names_the_forms_path() {
        let response = get(router(true), "/ready").await;
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body, json!({ "status": "ready", "forms": "/api/v1/forms" }));
    }

    #[tokio::test]
    async fn metrics_use_prometheus_text_format() {
        let response = get(router(true), "/metrics").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some(PROMETHEUS_TEXT)
        );
    }

    #[tokio::test]
    async fn receiver_health_is_mounted() {
        assert_eq!(status_of(router(false), "/health").await, StatusCode::OK);
    }
}
