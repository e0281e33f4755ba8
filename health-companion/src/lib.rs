pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use metrics_exporter_prometheus::PrometheusHandle;
use services::HealthCompanion;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub companion: HealthCompanion,
    /// Renders `/metrics`; absent when no recorder was installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(companion: HealthCompanion, metrics: Option<PrometheusHandle>) -> Self {
        Self { companion, metrics }
    }
}
