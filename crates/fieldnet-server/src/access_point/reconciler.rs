//! Reconciliation Loop
//!
//! One background task per access point. It waits on two event sources:
//!
//! ```text
//!            ┌──────── request ────────┐
//!            │                         v
//!         [Idle] ──poll tick──> [Polling]      pre-check converged? ──yes──> [Idle]
//!            ^                     │                    │ no
//!            └─────────────────────┘                    v
//!                               [Verifying] <── delay ── [Applying] <─┐
//!                                   │ mismatch                         │
//!                                   └──────────────────────────────────┘
//! ```
//!
//! A pending request always wins over a poll tick. While a request is being
//! reconciled nothing else runs; newer submissions wait in the queue and are
//! coalesced on the next drain.

use super::cache::StatusCache;
use super::queue::{DrainedRequest, RequestReceiver};
use crate::config::AccessPointConfig;
use crate::device::{DeviceController, DeviceHandle};
use crate::observability::{events, metrics};
use chrono::{DateTime, Utc};
use fieldnet_core::{converged, DesiredAssignment};
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::{sleep, Instant};
use tracing::{debug, info_span, Instrument};

/// What the loop is doing right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Polling,
    Applying,
    Verifying,
}

/// Snapshot of reconciliation activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileProgress {
    pub phase: Phase,
    /// Attempt number of the reconciliation in progress, 0 when idle
    pub attempt: u32,
    /// Requests taken off the queue, after coalescing
    pub requests_handled: u64,
    /// Requests that ended with the device matching
    pub completed: u64,
    /// Requests given up on after `max_attempts`
    pub abandoned: u64,
    /// Attempts used by the most recently finished reconciliation
    pub last_attempts: Option<u32>,
    /// Target currently being applied
    pub target: Option<DesiredAssignment>,
    /// Wall-clock time of the last successful status read
    pub last_read_at: Option<DateTime<Utc>>,
}

pub(crate) struct Reconciler<C: DeviceController> {
    name: String,
    device: DeviceHandle<C>,
    config: AccessPointConfig,
    requests: RequestReceiver,
    cache: StatusCache,
    progress: watch::Sender<ReconcileProgress>,
}

impl<C: DeviceController> Reconciler<C> {
    pub(crate) fn new(
        name: String,
        device: DeviceHandle<C>,
        config: AccessPointConfig,
        requests: RequestReceiver,
        cache: StatusCache,
        progress: watch::Sender<ReconcileProgress>,
    ) -> Self {
        Self {
            name,
            device,
            config,
            requests,
            cache,
            progress,
        }
    }

    /// Run until every submitter is gone.
    pub(crate) async fn run(mut self) {
        events::reconciler_started(&self.name, &self.config);

        loop {
            tokio::select! {
                biased;

                request = self.requests.recv_latest() => match request {
                    Some(request) => self.handle_request(request).await,
                    None => break,
                },

                _ = sleep(self.config.poll_interval) => self.poll().await,
            }
        }

        events::reconciler_stopped(&self.name);
    }

    async fn handle_request(&mut self, request: DrainedRequest) {
        if request.superseded > 0 {
            events::wifi_config_coalesced(&self.name, request.superseded, &request.desired);
            metrics::record_coalesced(&self.name, request.superseded);
        }
        self.progress.send_modify(|p| p.requests_handled += 1);

        let span = info_span!("reconcile", access_point = %self.name, desired = %request.desired);
        self.reconcile(request.desired).instrument(span).await;
    }

    /// Drive the device until it reports `desired`, or until the attempt cap.
    async fn reconcile(&mut self, desired: DesiredAssignment) {
        if converged(&desired, &self.cache.current()) {
            debug!(
                access_point = %self.name,
                desired = %desired,
                "Already converged, nothing to apply"
            );
            self.finish(Some(0), false);
            return;
        }

        let started = Instant::now();
        let mut attempt: u32 = 1;
        loop {
            self.set_phase(Phase::Applying, attempt, Some(desired));
            metrics::record_configure_attempt(&self.name);
            self.apply(&desired, attempt).await;

            sleep(self.config.retry_interval).await;

            self.set_phase(Phase::Verifying, attempt, Some(desired));
            self.refresh().await;
            let observed = self.cache.current();

            if converged(&desired, &observed) {
                events::wifi_reconcile_converged(&self.name, &desired, attempt);
                metrics::record_converged(&self.name, started.elapsed());
                self.finish(Some(attempt), false);
                return;
            }

            events::wifi_reconcile_attempt_failed(&self.name, &desired, attempt, &observed);

            if self.config.max_attempts.is_some_and(|max| attempt >= max) {
                events::wifi_reconcile_abandoned(&self.name, &desired, attempt);
                metrics::record_abandoned(&self.name);
                self.finish(Some(attempt), true);
                return;
            }
            attempt += 1;
        }
    }

    /// Login then push; failures are logged and left for verification to catch.
    async fn apply(&self, desired: &DesiredAssignment, attempt: u32) {
        let result = match self.device.login().await {
            Ok(()) => self.device.configure_wifi(*desired).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            events::wifi_configure_failed(&self.name, attempt, &e);
        }
    }

    async fn poll(&mut self) {
        self.set_phase(Phase::Polling, 0, None);
        self.refresh().await;
        self.set_phase(Phase::Idle, 0, None);
    }

    /// Read the device into the cache. A failed read keeps the last snapshot.
    async fn refresh(&self) {
        match self.cache.refresh(&self.device).await {
            Ok(()) => {
                let linked = self.cache.current().linked_team_count();
                metrics::set_linked_slots(&self.name, linked);
                self.progress.send_modify(|p| p.last_read_at = Some(Utc::now()));
            }
            Err(e) => {
                events::wifi_status_poll_failed(&self.name, &e);
                metrics::record_poll_failure(&self.name);
            }
        }
    }

    fn set_phase(&self, phase: Phase, attempt: u32, target: Option<DesiredAssignment>) {
        self.progress.send_modify(|p| {
            p.phase = phase;
            p.attempt = attempt;
            p.target = target;
        });
    }

    fn finish(&self, attempts: Option<u32>, abandoned: bool) {
        self.progress.send_modify(|p| {
            p.phase = Phase::Idle;
            p.attempt = 0;
            p.target = None;
            p.last_attempts = attempts;
            if abandoned {
                p.abandoned += 1;
            } else {
                p.completed += 1;
            }
        });
    }
}
