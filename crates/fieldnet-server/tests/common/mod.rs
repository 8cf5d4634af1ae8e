//! Shared test controller

use fieldnet_core::{DesiredAssignment, SLOT_COUNT};
use fieldnet_server::{DeviceController, DeviceError, DeviceStatus};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Device {
    /// Names the device reports
    applied: [String; SLOT_COUNT],
    /// Names written but not yet visible
    pending: Option<[String; SLOT_COUNT]>,
    reads_until_visible: usize,
    wifi_pushes: Vec<DesiredAssignment>,
    ethernet_pushes: Vec<DesiredAssignment>,
    fail_ethernet: bool,
}

/// Controller whose writes only become visible after a number of reads,
/// like a real access point restarting its radios.
#[derive(Clone, Default)]
pub struct LaggingController {
    device: Arc<Mutex<Device>>,
    lag: usize,
}

#[allow(dead_code)]
impl LaggingController {
    pub fn with_lag(lag: usize) -> Self {
        Self {
            lag,
            ..Self::default()
        }
    }

    pub fn wifi_pushes(&self) -> Vec<DesiredAssignment> {
        self.device.lock().unwrap().wifi_pushes.clone()
    }

    pub fn ethernet_pushes(&self) -> Vec<DesiredAssignment> {
        self.device.lock().unwrap().ethernet_pushes.clone()
    }

    pub fn fail_ethernet(&self, fail: bool) {
        self.device.lock().unwrap().fail_ethernet = fail;
    }

    /// Simulate someone editing the device by hand.
    pub fn overwrite(&self, names: [&str; SLOT_COUNT]) {
        self.device.lock().unwrap().applied = names.map(str::to_string);
    }
}

impl DeviceController for LaggingController {
    async fn login(&self) -> Result<(), DeviceError> {
        Ok(())
    }

    async fn configure_wifi(&self, desired: &DesiredAssignment) -> Result<(), DeviceError> {
        let mut device = self.device.lock().unwrap();
        device.wifi_pushes.push(*desired);
        let mut names = match &device.pending {
            Some(pending) => pending.clone(),
            None => device.applied.clone(),
        };
        for (slot, team) in desired.occupied() {
            names[slot.index()] = team.to_string();
        }
        // Re-pushing identical settings doesn't restart the radios.
        if device.pending.as_ref() != Some(&names) {
            device.reads_until_visible = self.lag;
        }
        device.pending = Some(names);
        Ok(())
    }

    async fn configure_ethernet(&self, desired: &DesiredAssignment) -> Result<(), DeviceError> {
        let mut device = self.device.lock().unwrap();
        if device.fail_ethernet {
            return Err(DeviceError::UnexpectedStatus {
                endpoint: "/api/s/default/rest/networkconf/n1".to_string(),
                status: 500,
                body: "api.err.Invalid".to_string(),
            });
        }
        device.ethernet_pushes.push(*desired);
        Ok(())
    }

    async fn read_status(&self) -> Result<DeviceStatus, DeviceError> {
        let mut device = self.device.lock().unwrap();
        if device.reads_until_visible > 0 {
            device.reads_until_visible -= 1;
        } else if let Some(names) = device.pending.take() {
            device.applied = names;
        }
        Ok(DeviceStatus::from_names(device.applied.clone()))
    }
}
