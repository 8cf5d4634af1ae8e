//! Application State
//!
//! Shared state passed to all API handlers.

use crate::access_point::AccessPoint;
use crate::device::DeviceController;
use crate::observability::MetricsState;
use crate::switch::Switch;

/// Shared application state
pub struct AppState<C: DeviceController> {
    pub access_point: AccessPoint,
    pub switch: Switch<C>,
    /// None when the Prometheus recorder couldn't be installed
    pub metrics_state: Option<MetricsState>,
}

impl<C: DeviceController> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            access_point: self.access_point.clone(),
            switch: self.switch.clone(),
            metrics_state: self.metrics_state.clone(),
        }
    }
}
