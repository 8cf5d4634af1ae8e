//! Typed UniFi controller payloads
//!
//! Request bodies are built only from validated values.

use fieldnet_core::{SlotSubnet, TeamId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for controller-facing values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("value must not be empty")]
    Empty,
    #[error("resource id {0:?} must be alphanumeric")]
    ResourceIdCharset(String),
    #[error("passphrase must be 8-63 characters, got {0}")]
    PassphraseLength(usize),
    #[error("passphrase must be printable ASCII")]
    PassphraseCharset,
}

/// Id of a pre-provisioned controller resource (network or wlan).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Result<Self, FieldError> {
        let id = id.into();
        if id.is_empty() {
            return Err(FieldError::Empty);
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(FieldError::ResourceIdCharset(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// WPA2 passphrase shared by the team networks.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Passphrase(String);

impl Passphrase {
    pub fn new(passphrase: impl Into<String>) -> Result<Self, FieldError> {
        let passphrase = passphrase.into();
        let len = passphrase.chars().count();
        if !(8..=63).contains(&len) {
            return Err(FieldError::PassphraseLength(len));
        }
        if !passphrase.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
            return Err(FieldError::PassphraseCharset);
        }
        Ok(Self(passphrase))
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passphrase(..)")
    }
}

/// Body of `POST /api/login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `PUT /api/s/{site}/rest/networkconf/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkConfUpdate {
    pub dhcpd_start: String,
    pub dhcpd_stop: String,
    pub ip_subnet: String,
}

impl NetworkConfUpdate {
    pub fn for_subnet(subnet: &SlotSubnet) -> Self {
        Self {
            dhcpd_start: subnet.dhcp_start().to_string(),
            dhcpd_stop: subnet.dhcp_stop().to_string(),
            ip_subnet: subnet.gateway_cidr(),
        }
    }
}

/// Body of `PUT /api/s/{site}/rest/wlanconf/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct WlanConfUpdate<'a> {
    pub networkconf_id: &'a ResourceId,
    pub name: String,
    pub x_passphrase: &'a Passphrase,
}

impl<'a> WlanConfUpdate<'a> {
    /// The wireless network for a team is named by its team number.
    pub fn for_team(team: TeamId, network_id: &'a ResourceId, passphrase: &'a Passphrase) -> Self {
        Self {
            networkconf_id: network_id,
            name: team.to_string(),
            x_passphrase: passphrase,
        }
    }
}

/// Response of `GET /api/s/{site}/rest/wlanconf`.
#[derive(Debug, Deserialize)]
pub struct WlanConfList {
    #[serde(default)]
    pub data: Vec<WlanConf>,
}

#[derive(Debug, Deserialize)]
pub struct WlanConf {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}
