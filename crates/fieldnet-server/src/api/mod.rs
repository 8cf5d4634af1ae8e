//! HTTP API Module
//!
//! This module contains:
//! - `state`: Shared application state
//! - `health`: Liveness probe
//! - `wifi`: Submit WiFi assignments and read the observed status
//! - `ethernet`: Configure wired team networks
//! - `metrics`: Prometheus metrics endpoint

mod ethernet;
mod health;
mod metrics;
mod state;
mod wifi;

pub use state::AppState;
pub use wifi::{AssignmentRequest, ErrorResponse, WifiStatusResponse};

use crate::device::DeviceController;
use axum::{
    routing::{get, post},
    Router,
};

/// Create the API router with all endpoints
pub fn create_router<C: DeviceController>(state: AppState<C>) -> Router {
    Router::new()
        // Health checks
        .route("/health", get(health::health_check))
        // Observability
        .route("/metrics", get(metrics::get_metrics::<C>))
        // Team networks
        .route("/api/wifi", post(wifi::configure_wifi::<C>))
        .route("/api/wifi/status", get(wifi::get_status::<C>))
        .route("/api/ethernet", post(ethernet::configure_ethernet::<C>))
        .with_state(state)
}
