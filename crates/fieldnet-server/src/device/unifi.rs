//! UniFi network controller client
//!
//! Talks to a UniFi controller's legacy REST API over HTTPS. The session is a
//! cookie set by `/api/login`; controllers ship self-signed certificates, so
//! certificate verification is disabled.

use super::payloads::{LoginRequest, NetworkConfUpdate, WlanConfList, WlanConfUpdate};
use super::{DeviceController, DeviceError, DeviceStatus, SlotReading};
use crate::config::{SlotResources, UnifiConfig};
use fieldnet_core::{DesiredAssignment, Slot, SlotSubnet, SLOT_COUNT};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, info};

/// [`DeviceController`] backed by a UniFi controller.
pub struct UnifiClient {
    config: UnifiConfig,
    http: reqwest::Client,
}

impl UnifiClient {
    pub fn new(config: UnifiConfig) -> Result<Self, DeviceError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(true)
            .connect_timeout(config.connect_timeout)
            .timeout(config.command_timeout)
            .build()
            .map_err(|e| DeviceError::transport(&config.address, e))?;

        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("https://{}{}", self.config.address, path)
    }

    fn site_path(&self, resource: &str) -> String {
        format!("/api/s/{}/rest/{}", self.config.site, resource)
    }

    fn resources(&self, slot: Slot) -> &SlotResources {
        &self.config.slots[slot.index()]
    }

    async fn put_json<T: Serialize>(&self, path: &str, body: &T) -> Result<(), DeviceError> {
        let response = self
            .http
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| DeviceError::transport(path, e))?;

        ensure_ok(path, response).await?;
        Ok(())
    }

    async fn configure_network(&self, slot: Slot, subnet: SlotSubnet) -> Result<(), DeviceError> {
        let network_id = &self.resources(slot).network_id;
        let path = self.site_path(&format!("networkconf/{network_id}"));
        let body = NetworkConfUpdate::for_subnet(&subnet);
        self.put_json(&path, &body).await?;
        info!(slot = %slot, subnet = %subnet, "Configured network");
        Ok(())
    }
}

/// Reject anything but 200, keeping the body for diagnostics.
async fn ensure_ok(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, DeviceError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(DeviceError::UnexpectedStatus {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
    })
}

/// Map the controller's wlan list onto slots by wlan resource id.
///
/// Slots whose wlan id is missing from the list read as an empty name.
fn status_from_wlans(list: &WlanConfList, slots: &[SlotResources; SLOT_COUNT]) -> DeviceStatus {
    let mut status = DeviceStatus::default();
    for (reading, resources) in status.slots.iter_mut().zip(slots) {
        if let Some(wlan) = list
            .data
            .iter()
            .find(|wlan| wlan.id == resources.wlan_id.as_str())
        {
            *reading = SlotReading {
                network_name: wlan.name.clone(),
                radio_linked: false,
            };
        }
    }
    status
}

impl DeviceController for UnifiClient {
    async fn login(&self) -> Result<(), DeviceError> {
        let path = "/api/login";
        let body = LoginRequest {
            username: &self.config.username,
            password: &self.config.password,
        };

        let response = self
            .http
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .map_err(|e| DeviceError::transport(path, e))?;

        ensure_ok(path, response).await?;
        debug!(address = %self.config.address, "Logged into UniFi controller");
        Ok(())
    }

    async fn configure_wifi(&self, desired: &DesiredAssignment) -> Result<(), DeviceError> {
        for (slot, team) in desired.occupied() {
            let resources = self.resources(slot);
            let path = self.site_path(&format!("wlanconf/{}", resources.wlan_id));
            let body =
                WlanConfUpdate::for_team(team, &resources.network_id, &self.config.passphrase);

            self.put_json(&path, &body).await?;
            info!(slot = %slot, team = %team, "Configured WLAN");
        }
        Ok(())
    }

    async fn configure_ethernet(&self, desired: &DesiredAssignment) -> Result<(), DeviceError> {
        for (slot, team) in desired.occupied() {
            // Park the slot on its neutral block before moving it to the team's subnet.
            let neutral = SlotSubnet::neutral(slot);
            self.configure_network(slot, neutral).await?;
            let team_subnet = SlotSubnet::for_team(team);
            self.configure_network(slot, team_subnet).await?;
        }
        Ok(())
    }

    async fn read_status(&self) -> Result<DeviceStatus, DeviceError> {
        let path = self.site_path("wlanconf");
        let response = self
            .http
            .get(self.url(&path))
            .send()
            .await
            .map_err(|e| DeviceError::transport(&path, e))?;

        let bytes = ensure_ok(&path, response)
            .await?
            .bytes()
            .await
            .map_err(|e| DeviceError::transport(&path, e))?;

        let list: WlanConfList =
            serde_json::from_slice(&bytes).map_err(|e| DeviceError::malformed(&path, e))?;

        debug!(wlans = list.data.len(), "Fetched WLAN configuration");
        Ok(status_from_wlans(&list, &self.config.slots))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::sample_unifi_config;

    #[test]
    fn test_urls() {
        let client = UnifiClient::new(sample_unifi_config()).unwrap();
        assert_eq!(client.url("/api/login"), "https://10.0.100.1:8443/api/login");
        assert_eq!(
            client.url(&client.site_path("wlanconf/w1")),
            "https://10.0.100.1:8443/api/s/default/rest/wlanconf/w1"
        );
    }

    #[test]
    fn test_status_from_wlans_maps_by_id() {
        let config = sample_unifi_config();
        let json = r#"{"data": [
            {"_id": "w6", "name": "973"},
            {"_id": "w1", "name": "254"},
            {"_id": "admin", "name": "FMS"},
            {"_id": "w3", "name": "not-a-team"}
        ]}"#;
        let list: WlanConfList = serde_json::from_str(json).unwrap();

        let status = status_from_wlans(&list, &config.slots);
        assert_eq!(status.slot(Slot::Red1).network_name, "254");
        assert_eq!(status.slot(Slot::Red2).network_name, "");
        assert_eq!(status.slot(Slot::Red3).network_name, "not-a-team");
        assert_eq!(status.slot(Slot::Blue3).network_name, "973");
        assert!(status.slots.iter().all(|s| !s.radio_linked));
    }
}
