use crate::infra::{AppState, InMemorySessionRepository};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use senate_directory::directory::{directory_router, DirectoryHandle};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_directory_routes(
    directory: Arc<DirectoryHandle>,
    sessions: Arc<InMemorySessionRepository>,
) -> axum::Router {
    directory_router(directory, sessions)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Ready once the listener is bound and the directory has loaded.
pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let listening = state.readiness.load(Ordering::Acquire);
    let loaded = state.directory.is_loaded().await;

    let (status, payload) = if listening && loaded {
        (StatusCode::OK, json!({ "status": "ready" }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "status": "initializing" }),
        )
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use senate_directory::config::DataConfig;
    use senate_directory::directory::{Directory, DirectoryLoader};
    use std::path::PathBuf;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn sources() -> DataConfig {
        DataConfig {
            records_path: PathBuf::from("./missing/senators.json"),
            images_path: PathBuf::from("./missing/imgSources.json"),
        }
    }

    fn directory() -> Directory {
        let records = br#"{"objects":[
            {"person":{"bioguideid":"S000001","firstname":"Alan","lastname":"Smith","gender":"male"},
             "party":"Republican","state":"OH","senator_rank":"senior"}
        ]}"#;
        let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        DirectoryLoader::from_slices(records, b"{}", today).expect("directory loads")
    }

    fn app(handle: DirectoryHandle, listening: bool) -> axum::Router {
        let handle = Arc::new(handle);
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(listening)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            directory: handle.clone(),
        };
        with_directory_routes(handle, Arc::new(InMemorySessionRepository::default()))
            .layer(Extension(state))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request builds")
    }

    #[tokio::test]
    async fn health_is_always_ok() {
        let response = app(DirectoryHandle::new(sources()), false)
            .oneshot(get("/health"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_waits_for_listener_and_directory() {
        let response = app(DirectoryHandle::preloaded(sources(), directory()), false)
            .oneshot(get("/ready"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(DirectoryHandle::new(sources()), true)
            .oneshot(get("/ready"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(DirectoryHandle::preloaded(sources(), directory()), true)
            .oneshot(get("/ready"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_render_as_prometheus_text() {
        let response = app(DirectoryHandle::new(sources()), true)
            .oneshot(get("/metrics"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(&b"text/plain; version=0.0.4"[..])
        );
    }

    #[tokio::test]
    async fn directory_routes_are_mounted() {
        let response = app(DirectoryHandle::preloaded(sources(), directory()), true)
            .oneshot(get("/api/v1/summary"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1 << 16)
            .await
            .expect("read body");
        let summary: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(summary["total"], 1);
    }
}
