//! Structured Events
//!
//! One function per domain event so field names stay consistent across the
//! application. Every event carries an `event_type` field.
//!
//! Event types:
//! - `actor_spawned` / `actor_stopped` - device actor lifecycle
//! - `reconciler_started` / `reconciler_stopped` - access point task lifecycle
//! - `wifi_config_requested` - request accepted into the queue
//! - `wifi_config_rejected` - request refused at submission
//! - `wifi_config_coalesced` - older queued requests dropped for a newer one
//! - `wifi_configure_failed` - login or push failed during an attempt
//! - `wifi_reconcile_attempt_failed` - read-back did not match
//! - `wifi_reconcile_converged` - read-back matched
//! - `wifi_reconcile_abandoned` - attempt cap reached
//! - `wifi_status_poll_failed` - status read failed, cache kept
//! - `ethernet_configured` / `ethernet_configure_failed` - switch passthrough

use crate::access_point::SubmitError;
use crate::config::AccessPointConfig;
use crate::device::DeviceError;
use fieldnet_core::{DesiredAssignment, ObservedStatus};
use tracing::{debug, error, info, warn};

/// Emit an actor spawned event
pub fn actor_spawned(actor_type: &str, actor_id: &str) {
    info!(
        event_type = "actor_spawned",
        actor_type = %actor_type,
        actor_id = %actor_id,
        "Actor spawned"
    );
}

/// Emit an actor stopped event
pub fn actor_stopped(actor_type: &str, actor_id: &str, reason: &str) {
    info!(
        event_type = "actor_stopped",
        actor_type = %actor_type,
        actor_id = %actor_id,
        reason = %reason,
        "Actor stopped"
    );
}

pub fn reconciler_started(access_point: &str, config: &AccessPointConfig) {
    info!(
        event_type = "reconciler_started",
        access_point = %access_point,
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        retry_interval_ms = config.retry_interval.as_millis() as u64,
        max_attempts = ?config.max_attempts,
        "Access point reconciler started"
    );
}

pub fn reconciler_stopped(access_point: &str) {
    info!(
        event_type = "reconciler_stopped",
        access_point = %access_point,
        "Access point reconciler stopped"
    );
}

/// Emit a request accepted event
pub fn wifi_config_requested(access_point: &str, desired: &DesiredAssignment, pending: usize) {
    info!(
        event_type = "wifi_config_requested",
        access_point = %access_point,
        desired = %desired,
        pending = pending,
        "WiFi configuration requested"
    );
}

/// Emit a request rejected event
pub fn wifi_config_rejected(access_point: &str, desired: &DesiredAssignment, reason: &SubmitError) {
    warn!(
        event_type = "wifi_config_rejected",
        access_point = %access_point,
        desired = %desired,
        reason = %reason,
        "WiFi configuration rejected"
    );
}

/// Emit a coalesced requests event
pub fn wifi_config_coalesced(access_point: &str, superseded: usize, applied: &DesiredAssignment) {
    debug!(
        event_type = "wifi_config_coalesced",
        access_point = %access_point,
        superseded = superseded,
        applied = %applied,
        "Dropped superseded WiFi requests"
    );
}

pub fn wifi_configure_failed(access_point: &str, attempt: u32, error: &DeviceError) {
    error!(
        event_type = "wifi_configure_failed",
        access_point = %access_point,
        attempt = attempt,
        error = %error,
        "Failed to push WiFi configuration"
    );
}

/// Emit a verification mismatch event
pub fn wifi_reconcile_attempt_failed(
    access_point: &str,
    desired: &DesiredAssignment,
    attempt: u32,
    observed: &ObservedStatus,
) {
    info!(
        event_type = "wifi_reconcile_attempt_failed",
        access_point = %access_point,
        desired = %desired,
        observed = ?observed.slots.map(|s| s.team_id),
        initialized = observed.initialized,
        attempt = attempt,
        "Access point WiFi configuration doesn't match yet, retrying"
    );
}

/// Emit a converged event
pub fn wifi_reconcile_converged(access_point: &str, desired: &DesiredAssignment, attempts: u32) {
    info!(
        event_type = "wifi_reconcile_converged",
        access_point = %access_point,
        desired = %desired,
        attempts = attempts,
        "Access point WiFi configuration matches"
    );
}

/// Emit an abandoned reconciliation event
pub fn wifi_reconcile_abandoned(access_point: &str, desired: &DesiredAssignment, attempts: u32) {
    error!(
        event_type = "wifi_reconcile_abandoned",
        access_point = %access_point,
        desired = %desired,
        attempts = attempts,
        "Gave up on WiFi configuration"
    );
}

pub fn wifi_status_poll_failed(access_point: &str, error: &DeviceError) {
    warn!(
        event_type = "wifi_status_poll_failed",
        access_point = %access_point,
        error = %error,
        "Failed to read access point status"
    );
}

pub fn ethernet_configured(switch: &str, desired: &DesiredAssignment) {
    info!(
        event_type = "ethernet_configured",
        switch = %switch,
        desired = %desired,
        "Ethernet networks configured"
    );
}

pub fn ethernet_configure_failed(switch: &str, desired: &DesiredAssignment, error: &DeviceError) {
    error!(
        event_type = "ethernet_configure_failed",
        switch = %switch,
        desired = %desired,
        error = %error,
        "Failed to configure Ethernet networks"
    );
}
