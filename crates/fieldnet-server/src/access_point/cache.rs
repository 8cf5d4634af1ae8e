//! Observed status cache
//!
//! Written only by the reconciler, read by anyone holding a receiver.

use crate::device::{DeviceController, DeviceError, DeviceHandle, DeviceStatus};
use fieldnet_core::{parse_team_id, ObservedStatus, SlotStatus, SLOT_COUNT};
use tokio::sync::watch;

pub struct StatusCache {
    tx: watch::Sender<ObservedStatus>,
}

impl StatusCache {
    pub fn new() -> (Self, watch::Receiver<ObservedStatus>) {
        let (tx, rx) = watch::channel(ObservedStatus::default());
        (Self { tx }, rx)
    }

    /// Copy of the last recorded status.
    pub fn current(&self) -> ObservedStatus {
        *self.tx.borrow()
    }

    /// Log in, read the device, and record the result.
    ///
    /// On failure the previous snapshot and its `initialized` flag are kept.
    pub async fn refresh<C: DeviceController>(
        &self,
        device: &DeviceHandle<C>,
    ) -> Result<(), DeviceError> {
        device.login().await?;
        let status = device.read_status().await?;
        self.record(&status);
        Ok(())
    }

    pub(crate) fn record(&self, status: &DeviceStatus) {
        let slots = parse_readings(status);
        self.tx.send_modify(|observed| observed.record(slots));
    }
}

/// Convert raw readings into per-slot team ids.
///
/// A name that doesn't parse only zeroes its own slot.
pub fn parse_readings(status: &DeviceStatus) -> [SlotStatus; SLOT_COUNT] {
    status.slots.each_ref().map(|reading| SlotStatus {
        team_id: parse_team_id(&reading.network_name),
        radio_linked: reading.radio_linked,
    })
}
