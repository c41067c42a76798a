//! HTTP ingress: health endpoint plus request id, tracing, timeout, CORS and
//! body-limit layers around the module routes.

use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderName, Request},
    response::Json,
    routing::get,
    Router,
};
use runtime::ServerConfig;
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub fn request_id_header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

#[derive(Clone, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _req: &Request<B>) -> Option<RequestId> {
        let id = nanoid::nanoid!();
        Some(RequestId::new(id.parse().ok()?))
    }
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

fn make_span(req: &Request<Body>) -> Span {
    let rid = req
        .headers()
        .get(request_id_header())
        .and_then(|v| v.to_str().ok())
        .unwrap_or("n/a");
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        uri = %req.uri().path(),
        request_id = %rid
    )
}

/// Wrap `routes` with the ingress stack. Outermost to innermost:
/// SetRequestId -> Trace -> PropagateRequestId -> Timeout -> CORS -> BodyLimit.
pub fn build_router(routes: Router, cfg: &ServerConfig) -> Router {
    let x_request_id = request_id_header();
    let timeout = match cfg.timeout_sec {
        0 => DEFAULT_TIMEOUT,
        secs => Duration::from_secs(secs),
    };

    let mut router = routes
        .route("/health", get(health_check))
        .layer(RequestBodyLimitLayer::new(cfg.body_limit_mb * 1024 * 1024));

    if cfg.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    router
        .layer(TimeoutLayer::new(timeout))
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(x_request_id, MakeReqId))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(Router::new(), &ServerConfig::default())
    }

    #[tokio::test]
    async fn health_reports_healthy_and_sets_request_id() {
        let resp = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let rid = resp
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        assert!(!rid.is_empty());

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn client_request_id_is_propagated() {
        let resp = app()
            .oneshot(
                Request::get("/health")
                    .header("x-request-id", "from-client")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.headers()["x-request-id"], "from-client");
    }
}
