//! Router assembly and server lifecycle.

use crate::config::CompanionConfig;
use crate::handlers::{
    app::{health_check, index, metrics, readiness_check},
    food::analyze_food,
    insights::get_insights,
    meal_plan::{download_meal_plan, generate_meal_plan},
    profile::{get_profile, update_profile},
};
use crate::services::providers::gemini::GeminiTextProvider;
use crate::services::providers::TextProvider;
use crate::services::{HealthCompanion, InferenceGateway};
use crate::AppState;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use companion_core::error::AppError;
use companion_core::middleware::{
    make_request_span, metrics::metrics_middleware, request_id_middleware,
    security_headers_middleware,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Knobs the router needs beyond [`AppState`].
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub secure_cookie: bool,
    pub session_inactivity: time::Duration,
    pub max_upload_bytes: usize,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            secure_cookie: false,
            session_inactivity: time::Duration::hours(24),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl From<&CompanionConfig> for RouterSettings {
    fn from(config: &CompanionConfig) -> Self {
        Self {
            secure_cookie: config.session.secure_cookie,
            session_inactivity: time::Duration::hours(config.session.inactivity_hours),
            max_upload_bytes: config.uploads.max_upload_bytes,
        }
    }
}

pub fn build_router(state: AppState, settings: RouterSettings) -> Router {
    // Profiles live only as long as the in-memory session.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(settings.secure_cookie)
        .with_expiry(Expiry::OnInactivity(settings.session_inactivity));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .route("/profile", get(get_profile).post(update_profile))
        .route("/meal-plan", post(generate_meal_plan))
        .route("/meal-plan/download", get(download_meal_plan))
        .route(
            "/food-analysis",
            post(analyze_food).layer(DefaultBodyLimit::max(settings.max_upload_bytes)),
        )
        .route("/insights", post(get_insights))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| make_request_span(request)),
        )
        // Outermost, so the span above sees the request id.
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application against the Gemini API.
    pub async fn build(
        config: CompanionConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Result<Self, AppError> {
        let provider = GeminiTextProvider::new(config.gemini_config())
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        tracing::info!(
            model = %config.models.text_model,
            "Initialized Gemini text provider"
        );

        Self::build_with_provider(config, Arc::new(provider), metrics).await
    }

    /// Build the application with an explicit provider (tests, offline runs).
    pub async fn build_with_provider(
        config: CompanionConfig,
        provider: Arc<dyn TextProvider>,
        metrics: Option<PrometheusHandle>,
    ) -> Result<Self, AppError> {
        let gateway = InferenceGateway::new(provider, config.generation_params());
        let state = AppState::new(HealthCompanion::new(gateway), metrics);
        let router = build_router(state, RouterSettings::from(&config));

        let host: std::net::IpAddr = config.common.host.parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "invalid host '{}': {}",
                config.common.host,
                e
            ))
        })?;

        // Port 0 picks a random port (tests).
        let addr = SocketAddr::new(host, config.common.port);
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Health companion listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
