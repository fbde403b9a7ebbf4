//! Shared application state

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use diascreen_model::Predictor;

/// State injected into every request handler.
///
/// The predictor is loaded once at startup and read-only thereafter, so
/// concurrent requests share it without any locking.
#[derive(Clone)]
pub struct AppState {
    /// The loaded model
    pub predictor: Arc<Predictor>,

    /// Prometheus render handle for the metrics endpoint
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(predictor: Predictor, metrics: PrometheusHandle) -> Self {
        Self {
            predictor: Arc::new(predictor),
            metrics,
        }
    }
}
