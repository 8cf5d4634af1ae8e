//! Access Point Reconciler
//!
//! Each [`AccessPoint`] owns its request queue, status cache and background
//! reconciliation task. Callers submit a [`DesiredAssignment`] and return
//! immediately; the task pushes it to the device and keeps retrying until a
//! read-back matches.
//!
//! - `queue`: bounded, non-blocking, latest-wins intake
//! - `cache`: last observed status, published over a watch channel
//! - `reconciler`: the request/poll loop

mod cache;
mod queue;
mod reconciler;

pub use cache::{parse_readings, StatusCache};
pub use queue::{request_queue, DrainedRequest, RequestQueue, RequestReceiver, SubmitError};
pub use reconciler::{Phase, ReconcileProgress};

use crate::config::AccessPointConfig;
use crate::device::{DeviceController, DeviceHandle};
use crate::observability::{events, metrics};
use fieldnet_core::{DesiredAssignment, ObservedStatus};
use reconciler::Reconciler;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handle to one managed access point.
///
/// Cheap to clone. The background task exits once every clone is dropped.
#[derive(Clone)]
pub struct AccessPoint {
    name: String,
    queue: RequestQueue,
    status: watch::Receiver<ObservedStatus>,
    progress: watch::Receiver<ReconcileProgress>,
}

impl AccessPoint {
    /// Start the reconciliation task for a device.
    pub fn spawn<C: DeviceController>(
        name: impl Into<String>,
        device: DeviceHandle<C>,
        config: AccessPointConfig,
    ) -> (Self, JoinHandle<()>) {
        let name = name.into();
        let (queue, requests) = request_queue(config.request_buffer);
        let (cache, status) = StatusCache::new();
        let (progress_tx, progress) = watch::channel(ReconcileProgress::default());

        let reconciler = Reconciler::new(
            name.clone(),
            device,
            config,
            requests,
            cache,
            progress_tx,
        );
        let task = tokio::spawn(reconciler.run());

        let access_point = Self {
            name,
            queue,
            status,
            progress,
        };
        (access_point, task)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue a desired assignment without waiting for it to be applied.
    ///
    /// Fails with [`SubmitError::BufferFull`] when the reconciler is too far
    /// behind; nothing is queued in that case.
    pub fn configure_team_wifi(&self, desired: DesiredAssignment) -> Result<(), SubmitError> {
        match self.queue.submit(desired) {
            Ok(()) => {
                events::wifi_config_requested(&self.name, &desired, self.queue.pending());
                Ok(())
            }
            Err(e) => {
                events::wifi_config_rejected(&self.name, &desired, &e);
                metrics::record_rejected(&self.name);
                Err(e)
            }
        }
    }

    /// Last observed status.
    pub fn status(&self) -> ObservedStatus {
        *self.status.borrow()
    }

    pub fn progress(&self) -> ReconcileProgress {
        self.progress.borrow().clone()
    }

    /// Receiver that wakes on every progress change.
    pub fn subscribe_progress(&self) -> watch::Receiver<ReconcileProgress> {
        self.progress.clone()
    }

    /// Receiver that wakes on every status read.
    pub fn subscribe_status(&self) -> watch::Receiver<ObservedStatus> {
        self.status.clone()
    }
}
