//! Coalescing request intake
//!
//! Submissions go into a bounded channel without blocking. The reconciler
//! drains everything pending when it wakes and keeps only the newest entry:
//! assignments describe an end state, so intermediate ones are safe to drop.

use fieldnet_core::DesiredAssignment;
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The buffer is at capacity; the caller decides whether to resubmit.
    #[error("WiFi config request buffer full")]
    BufferFull,
    #[error("access point reconciler is not running")]
    Stopped,
}

/// Sending half, shared by every submitter.
#[derive(Clone)]
pub struct RequestQueue {
    tx: mpsc::Sender<DesiredAssignment>,
}

/// Receiving half, owned by the reconciler.
pub struct RequestReceiver {
    rx: mpsc::Receiver<DesiredAssignment>,
}

/// The newest pending request and how many older ones it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainedRequest {
    pub desired: DesiredAssignment,
    pub superseded: usize,
}

/// Create a queue holding at most `capacity` pending requests (minimum 1).
pub fn request_queue(capacity: usize) -> (RequestQueue, RequestReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (RequestQueue { tx }, RequestReceiver { rx })
}

impl RequestQueue {
    /// Enqueue a request without waiting.
    pub fn submit(&self, desired: DesiredAssignment) -> Result<(), SubmitError> {
        self.tx.try_send(desired).map_err(|e| match e {
            TrySendError::Full(_) => SubmitError::BufferFull,
            TrySendError::Closed(_) => SubmitError::Stopped,
        })
    }

    /// Number of requests currently buffered.
    pub fn pending(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }
}

impl RequestReceiver {
    /// Wait for a request, then drain the buffer and return only the newest.
    ///
    /// Returns `None` once every [`RequestQueue`] has been dropped and the
    /// buffer is empty. Cancel safe.
    pub async fn recv_latest(&mut self) -> Option<DrainedRequest> {
        let mut desired = self.rx.recv().await?;
        let mut superseded = 0;
        while let Ok(newer) = self.rx.try_recv() {
            desired = newer;
            superseded += 1;
        }
        Some(DrainedRequest {
            desired,
            superseded,
        })
    }
}
