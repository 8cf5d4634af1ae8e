//! Device Boundary
//!
//! Everything fieldnet knows about the physical network controller goes
//! through the [`DeviceController`] trait. The controller is owned by a
//! [`DeviceActor`], and callers reach it through a cloneable [`DeviceHandle`]
//! so that login, configure and read calls never interleave, no matter how
//! many access points and switches share one controller.
//!
//! ```text
//! AccessPoint ──┐
//!               ├─> DeviceHandle ─> DeviceActor (mailbox) ─> UnifiClient ─> HTTPS
//! Switch ───────┘
//! ```

mod actor;
mod error;
mod messages;
pub mod payloads;
mod unifi;

#[cfg(test)]
pub(crate) mod mock;

pub use actor::{DeviceActor, DeviceHandle};
pub use error::DeviceError;
pub use messages::{ConfigureEthernet, ConfigureWifi, Login, ReadStatus};
pub use unifi::UnifiClient;

use fieldnet_core::{DesiredAssignment, Slot, SLOT_COUNT};
use serde::Serialize;
use std::future::Future;

/// Raw per-slot reading returned by a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotReading {
    /// Name of the wireless network currently bound to the slot.
    pub network_name: String,
    pub radio_linked: bool,
}

/// Raw status of all slots as returned by a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceStatus {
    pub slots: [SlotReading; SLOT_COUNT],
}

impl DeviceStatus {
    pub fn slot(&self, slot: Slot) -> &SlotReading {
        &self.slots[slot.index()]
    }

    /// Build a status from one network name per slot.
    pub fn from_names<S: AsRef<str>>(names: [S; SLOT_COUNT]) -> Self {
        Self {
            slots: names.map(|name| SlotReading {
                network_name: name.as_ref().to_string(),
                radio_linked: false,
            }),
        }
    }
}

/// Capability to configure and read back one physical network controller.
///
/// Implementations may be slow and every call may fail independently.
/// Callers must not issue concurrent calls against the same controller;
/// [`DeviceActor`] guarantees this.
pub trait DeviceController: Send + Sync + 'static {
    /// Authenticate the session.
    fn login(&self) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Push wireless network settings for every occupied slot.
    ///
    /// Empty slots are left untouched.
    fn configure_wifi(
        &self,
        desired: &DesiredAssignment,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Push wired network settings for every occupied slot.
    ///
    /// Empty slots are left untouched.
    fn configure_ethernet(
        &self,
        desired: &DesiredAssignment,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Read the network name bound to each slot.
    fn read_status(&self) -> impl Future<Output = Result<DeviceStatus, DeviceError>> + Send;
}
