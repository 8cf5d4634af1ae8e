//! Per-slot subnet derivation
//!
//! A team's wired and wireless traffic lives in `10.{team / 100}.{team % 100}.0/24`.
//! While a slot is being reset it is parked on a neutral block
//! `10.0.{101 + slot}.0/24` that no team number can produce.

use crate::slot::Slot;
use crate::team::TeamId;
use std::net::Ipv4Addr;

const GATEWAY_HOST: u8 = 4;
const DHCP_FIRST_HOST: u8 = 20;
const DHCP_LAST_HOST: u8 = 199;
const NEUTRAL_THIRD_OCTET_BASE: u8 = 101;

/// The /24 network assigned to a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotSubnet {
    second: u8,
    third: u8,
}

impl SlotSubnet {
    /// Subnet derived from a team number.
    pub fn for_team(team: TeamId) -> Self {
        let id = team.get();
        // TeamId::MAX keeps the high part within one octet.
        Self {
            second: (id / 100) as u8,
            third: (id % 100) as u8,
        }
    }

    /// Reserved subnet used while a slot is being reset.
    pub fn neutral(slot: Slot) -> Self {
        Self {
            second: 0,
            third: NEUTRAL_THIRD_OCTET_BASE + slot.index() as u8,
        }
    }

    fn host(&self, host: u8) -> Ipv4Addr {
        Ipv4Addr::new(10, self.second, self.third, host)
    }

    /// Gateway address with prefix length, e.g. `10.2.54.4/24`.
    pub fn gateway_cidr(&self) -> String {
        format!("{}/24", self.host(GATEWAY_HOST))
    }

    pub fn dhcp_start(&self) -> Ipv4Addr {
        self.host(DHCP_FIRST_HOST)
    }

    pub fn dhcp_stop(&self) -> Ipv4Addr {
        self.host(DHCP_LAST_HOST)
    }

    pub fn network(&self) -> Ipv4Addr {
        self.host(0)
    }
}

impl std::fmt::Display for SlotSubnet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/24", self.network())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_subnet() {
        let subnet = SlotSubnet::for_team(TeamId::new(254).unwrap());
        assert_eq!(subnet.to_string(), "10.2.54.0/24");
        assert_eq!(subnet.gateway_cidr(), "10.2.54.4/24");
        assert_eq!(subnet.dhcp_start(), Ipv4Addr::new(10, 2, 54, 20));
        assert_eq!(subnet.dhcp_stop(), Ipv4Addr::new(10, 2, 54, 199));
    }

    #[test]
    fn test_small_and_large_teams() {
        let team_subnet = |n| SlotSubnet::for_team(TeamId::new(n).unwrap()).to_string();
        assert_eq!(team_subnet(7), "10.0.7.0/24");
        assert_eq!(team_subnet(TeamId::MAX), "10.255.99.0/24");
    }

    #[test]
    fn test_neutral_subnet_per_slot() {
        let red1 = SlotSubnet::neutral(Slot::Red1);
        let blue3 = SlotSubnet::neutral(Slot::Blue3);
        assert_eq!(red1.to_string(), "10.0.101.0/24");
        assert_eq!(blue3.to_string(), "10.0.106.0/24");
        let red2 = SlotSubnet::neutral(Slot::Red2);
        assert_eq!(red2.gateway_cidr(), "10.0.102.4/24");
    }
}
