//! DeviceActor Message Types

use fieldnet_core::DesiredAssignment;

/// Authenticate the controller session.
#[derive(Debug, Clone)]
pub struct Login;

/// Push wireless settings for the occupied slots.
#[derive(Debug, Clone)]
pub struct ConfigureWifi {
    pub desired: DesiredAssignment,
}

/// Push wired settings for the occupied slots.
#[derive(Debug, Clone)]
pub struct ConfigureEthernet {
    pub desired: DesiredAssignment,
}

/// Read the per-slot network names.
#[derive(Debug, Clone)]
pub struct ReadStatus;
