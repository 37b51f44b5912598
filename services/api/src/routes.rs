use crate::infra::{AppState, Application};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use hireboard::accounts::account_router;
use hireboard::matching::match_router;
use hireboard::moderation::moderation_router;
use hireboard::stats::stats_router;
use hireboard::users::user_router;
use serde_json::json;
use std::sync::atomic::Ordering;

/// Console and match routes plus operational endpoints. The caller layers [`AppState`].
pub(crate) fn with_console_routes(app: &Application) -> Router {
    Router::new()
        .merge(account_router(app.accounts.clone()))
        .merge(user_router(app.users.clone()))
        .merge(moderation_router(app.moderation.clone()))
        .merge(stats_router(app.stats.clone()))
        .merge(match_router(app.matching.clone()))
        .layer(Extension(app.authenticator.clone()))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
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
