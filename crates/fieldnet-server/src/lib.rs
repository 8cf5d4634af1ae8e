//! Fieldnet Server Library
//!
//! Keeps a field network's access point and switch configured for the teams
//! currently assigned to each slot.

pub mod access_point;
pub mod api;
pub mod config;
pub mod device;
pub mod observability;
pub mod switch;

pub use access_point::{AccessPoint, ReconcileProgress, SubmitError};
pub use device::{DeviceController, DeviceError, DeviceHandle, DeviceStatus, SlotReading};
pub use switch::Switch;
