//! Prometheus Metrics
//!
//! Defines and initializes all Prometheus metrics for fieldnet.
//!
//! Metrics tracked:
//! - `fieldnet_actor_count` - gauge of active actors by type
//! - `fieldnet_actor_spawned_total` - counter of spawned actors
//! - `fieldnet_actor_stopped_total` - counter of stopped actors with reason
//! - `fieldnet_wifi_configure_attempts_total` - counter of configuration pushes
//! - `fieldnet_wifi_converged_total` - counter of requests that converged
//! - `fieldnet_wifi_abandoned_total` - counter of requests given up on
//! - `fieldnet_wifi_requests_coalesced_total` - counter of superseded requests
//! - `fieldnet_wifi_requests_rejected_total` - counter of rejected submissions
//! - `fieldnet_status_poll_failures_total` - counter of failed status reads
//! - `fieldnet_linked_slots` - gauge of slots reporting a team
//! - `fieldnet_wifi_convergence_duration_seconds` - histogram of time to converge
//! - `fieldnet_ethernet_configure_total` - counter of switch pushes by outcome

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// State containing the Prometheus handle for metrics export
#[derive(Clone)]
pub struct MetricsState {
    pub prometheus_handle: PrometheusHandle,
}

/// Install the Prometheus recorder and register metric descriptions.
pub fn init_metrics() -> Result<MetricsState, Box<dyn std::error::Error + Send + Sync>> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    register_metric_descriptions();

    Ok(MetricsState {
        prometheus_handle: handle,
    })
}

fn register_metric_descriptions() {
    // Actor metrics
    describe_gauge!("fieldnet_actor_count", "Number of active actors by type");
    describe_counter!(
        "fieldnet_actor_spawned_total",
        "Total number of actors spawned"
    );
    describe_counter!(
        "fieldnet_actor_stopped_total",
        "Total number of actors stopped"
    );

    // Reconciliation metrics
    describe_counter!(
        "fieldnet_wifi_configure_attempts_total",
        "Total number of WiFi configuration attempts"
    );
    describe_counter!(
        "fieldnet_wifi_converged_total",
        "Total number of WiFi requests that converged"
    );
    describe_counter!(
        "fieldnet_wifi_abandoned_total",
        "Total number of WiFi requests abandoned after the attempt limit"
    );
    describe_counter!(
        "fieldnet_wifi_requests_coalesced_total",
        "Total number of queued WiFi requests superseded by a newer one"
    );
    describe_counter!(
        "fieldnet_wifi_requests_rejected_total",
        "Total number of WiFi requests rejected at submission"
    );
    describe_counter!(
        "fieldnet_status_poll_failures_total",
        "Total number of failed device status reads"
    );
    describe_gauge!(
        "fieldnet_linked_slots",
        "Number of slots currently reporting a team"
    );
    describe_histogram!(
        "fieldnet_wifi_convergence_duration_seconds",
        "Time from first configuration push to matching read-back in seconds"
    );

    // Switch metrics
    describe_counter!(
        "fieldnet_ethernet_configure_total",
        "Total number of Ethernet configuration pushes by outcome"
    );
}

/// Record that an actor was spawned
pub fn record_actor_spawned(actor_type: &str) {
    counter!("fieldnet_actor_spawned_total", "actor_type" => actor_type.to_string()).increment(1);
    gauge!("fieldnet_actor_count", "actor_type" => actor_type.to_string()).increment(1.0);
}

/// Record that an actor was stopped
pub fn record_actor_stopped(actor_type: &str, reason: &str) {
    counter!(
        "fieldnet_actor_stopped_total",
        "actor_type" => actor_type.to_string(),
        "reason" => reason.to_string()
    )
    .increment(1);
    gauge!("fieldnet_actor_count", "actor_type" => actor_type.to_string()).decrement(1.0);
}

pub fn record_configure_attempt(access_point: &str) {
    counter!(
        "fieldnet_wifi_configure_attempts_total",
        "access_point" => access_point.to_string()
    )
    .increment(1);
}

/// Record a converged request and how long it took
pub fn record_converged(access_point: &str, duration: Duration) {
    counter!(
        "fieldnet_wifi_converged_total",
        "access_point" => access_point.to_string()
    )
    .increment(1);
    histogram!(
        "fieldnet_wifi_convergence_duration_seconds",
        "access_point" => access_point.to_string()
    )
    .record(duration.as_secs_f64());
}

pub fn record_abandoned(access_point: &str) {
    counter!(
        "fieldnet_wifi_abandoned_total",
        "access_point" => access_point.to_string()
    )
    .increment(1);
}

pub fn record_coalesced(access_point: &str, superseded: usize) {
    counter!(
        "fieldnet_wifi_requests_coalesced_total",
        "access_point" => access_point.to_string()
    )
    .increment(superseded as u64);
}

pub fn record_rejected(access_point: &str) {
    counter!(
        "fieldnet_wifi_requests_rejected_total",
        "access_point" => access_point.to_string()
    )
    .increment(1);
}

pub fn record_poll_failure(access_point: &str) {
    counter!(
        "fieldnet_status_poll_failures_total",
        "access_point" => access_point.to_string()
    )
    .increment(1);
}

/// Update the linked slots gauge
pub fn set_linked_slots(access_point: &str, count: usize) {
    gauge!(
        "fieldnet_linked_slots",
        "access_point" => access_point.to_string()
    )
    .set(count as f64);
}

pub fn record_ethernet_configure(switch: &str, outcome: &str) {
    counter!(
        "fieldnet_ethernet_configure_total",
        "switch" => switch.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}
