//! Ethernet Switch
//!
//! Direct passthrough to the device: no queue, no retry, no read-back. The
//! caller gets the device's error and decides what to do with it.

use crate::device::{DeviceController, DeviceError, DeviceHandle};
use crate::observability::{events, metrics};
use fieldnet_core::DesiredAssignment;

pub struct Switch<C: DeviceController> {
    name: String,
    device: DeviceHandle<C>,
}

impl<C: DeviceController> Clone for Switch<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            device: self.device.clone(),
        }
    }
}

impl<C: DeviceController> Switch<C> {
    pub fn new(name: impl Into<String>, device: DeviceHandle<C>) -> Self {
        Self {
            name: name.into(),
            device,
        }
    }

    /// Configure the wired team networks for every occupied slot.
    pub async fn configure_team_ethernet(
        &self,
        desired: &DesiredAssignment,
    ) -> Result<(), DeviceError> {
        let result = async {
            self.device.login().await?;
            self.device.configure_ethernet(*desired).await
        }
        .await;

        match &result {
            Ok(()) => {
                events::ethernet_configured(&self.name, desired);
                metrics::record_ethernet_configure(&self.name, "ok");
            }
            Err(e) => {
                events::ethernet_configure_failed(&self.name, desired, e);
                metrics::record_ethernet_configure(&self.name, "error");
            }
        }
        result
    }
}
