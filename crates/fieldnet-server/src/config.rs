//! Configuration
//!
//! Centralized settings for the access point reconciler and the UniFi
//! controller, with environment variable overrides.

use crate::device::payloads::{FieldError, Passphrase, ResourceId};
use fieldnet_core::{Slot, SLOT_COUNT};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(String),
    #[error("invalid value for {key}: {source}")]
    Invalid {
        key: String,
        #[source]
        source: FieldError,
    },
    #[error("{key} must be a positive integer, got {value:?}")]
    NotANumber { key: String, value: String },
}

/// Reconciliation loop settings for one access point.
#[derive(Debug, Clone)]
pub struct AccessPointConfig {
    /// Idle interval between drift-detection reads (env: FIELDNET_AP_POLL_SECS)
    pub poll_interval: Duration,

    /// Delay between a configuration push and its read-back (env: FIELDNET_AP_RETRY_SECS)
    pub retry_interval: Duration,

    /// Capacity of the request buffer
    pub request_buffer: usize,

    /// Give up on a request after this many attempts; `None` retries forever
    /// (env: FIELDNET_AP_MAX_ATTEMPTS)
    pub max_attempts: Option<u32>,
}

impl Default for AccessPointConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            retry_interval: Duration::from_secs(5),
            request_buffer: 10,
            max_attempts: None,
        }
    }
}

impl AccessPointConfig {
    /// Create configuration from environment variables with defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(secs) = positive(&lookup, "FIELDNET_AP_POLL_SECS")? {
            config.poll_interval = Duration::from_secs(secs.into());
        }

        if let Some(secs) = positive(&lookup, "FIELDNET_AP_RETRY_SECS")? {
            config.retry_interval = Duration::from_secs(secs.into());
        }

        config.max_attempts = positive(&lookup, "FIELDNET_AP_MAX_ATTEMPTS")?;

        Ok(config)
    }
}

/// Pre-provisioned controller resources backing one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotResources {
    pub network_id: ResourceId,
    pub wlan_id: ResourceId,
}

/// Connection settings for a UniFi controller.
#[derive(Debug, Clone)]
pub struct UnifiConfig {
    /// Controller host and optional port (env: UNIFI_ADDRESS)
    pub address: String,
    /// env: UNIFI_USERNAME
    pub username: String,
    /// env: UNIFI_PASSWORD
    pub password: String,
    /// Controller site name (env: UNIFI_SITE)
    pub site: String,
    /// Passphrase for every team WLAN (env: UNIFI_WPA_PASSPHRASE)
    pub passphrase: Passphrase,
    /// Network and WLAN ids per slot (env: UNIFI_<SLOT>_NETWORK_ID, UNIFI_<SLOT>_WIFI_ID)
    pub slots: [SlotResources; SLOT_COUNT],
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
}

impl UnifiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &str| -> Result<String, ConfigError> {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::Missing(key.to_string()))
        };

        let resource = |key: String| -> Result<ResourceId, ConfigError> {
            ResourceId::new(required(&key)?)
                .map_err(|source| ConfigError::Invalid { key, source })
        };

        let mut slots = Vec::with_capacity(SLOT_COUNT);
        for slot in Slot::all() {
            let prefix = format!("UNIFI_{}", slot.as_ref().to_uppercase());
            slots.push(SlotResources {
                network_id: resource(format!("{prefix}_NETWORK_ID"))?,
                wlan_id: resource(format!("{prefix}_WIFI_ID"))?,
            });
        }
        let slots: [SlotResources; SLOT_COUNT] = slots
            .try_into()
            .map_err(|_| ConfigError::Missing("UNIFI_<SLOT>_* resource ids".to_string()))?;

        let passphrase_key = "UNIFI_WPA_PASSPHRASE";
        let passphrase = required(passphrase_key)?;
        let passphrase = Passphrase::new(passphrase).map_err(|source| ConfigError::Invalid {
            key: passphrase_key.to_string(),
            source,
        })?;

        Ok(Self {
            address: required("UNIFI_ADDRESS")?,
            username: required("UNIFI_USERNAME")?,
            password: required("UNIFI_PASSWORD")?,
            site: lookup("UNIFI_SITE").unwrap_or_else(|| "default".to_string()),
            passphrase,
            slots,
            connect_timeout: Duration::from_secs(1),
            command_timeout: Duration::from_secs(5),
        })
    }
}

fn positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<u32>, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ConfigError::NotANumber {
            key: key.to_string(),
            value,
        }),
    }
}
