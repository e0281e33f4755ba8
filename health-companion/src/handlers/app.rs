use crate::models::HealthProfile;
use crate::services::{ProfileStore, SessionProfileStore};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use companion_core::error::AppError;
use serde_json::json;
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub profile: HealthProfile,
    pub profile_json: String,
}

pub async fn index(session: Session) -> Result<IndexTemplate, AppError> {
    let profile = SessionProfileStore::new(session).get().await?;
    let profile_json = profile.to_pretty_json();
    Ok(IndexTemplate {
        profile,
        profile_json,
    })
}

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "health-companion",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: the model provider must accept our credentials.
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    match state.companion.gateway().health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))).into_response(),
        Err(e) => {
            tracing::warn!(kind = e.kind.as_str(), error = %e, "Readiness check failed");
            AppError::ServiceUnavailable(e.to_string()).into_response()
        }
    }
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
