//! Observed device status

use crate::slot::{Slot, SLOT_COUNT};
use serde::{Deserialize, Serialize};

/// What the device last reported for one slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotStatus {
    /// Team number parsed from the slot's network name; 0 means no team.
    pub team_id: u32,
    pub radio_linked: bool,
}

/// Last read-back state of the device.
///
/// `initialized` becomes true after the first successful read and is never
/// cleared afterwards, so a failed read leaves the previous snapshot in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedStatus {
    pub slots: [SlotStatus; SLOT_COUNT],
    pub initialized: bool,
}

impl ObservedStatus {
    pub fn slot(&self, slot: Slot) -> &SlotStatus {
        &self.slots[slot.index()]
    }

    /// Record a successful read.
    pub fn record(&mut self, slots: [SlotStatus; SLOT_COUNT]) {
        self.slots = slots;
        self.initialized = true;
    }

    /// Number of slots currently carrying a team.
    pub fn linked_team_count(&self) -> usize {
        self.slots.iter().filter(|s| s.team_id != 0).count()
    }
}

/// Parse a team number out of a network name.
///
/// Anything that isn't a plain unsigned number reads as 0 ("no team"), which
/// surfaces as a convergence mismatch instead of an error.
pub fn parse_team_id(name: &str) -> u32 {
    name.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_team_id() {
        assert_eq!(parse_team_id("254"), 254);
        assert_eq!(parse_team_id(" 1114 "), 0);
        assert_eq!(parse_team_id(""), 0);
        assert_eq!(parse_team_id("FMS-admin"), 0);
        assert_eq!(parse_team_id("-5"), 0);
    }

    #[test]
    fn test_record_sets_initialized() {
        let mut status = ObservedStatus::default();
        assert!(!status.initialized);

        let mut slots = [SlotStatus::default(); SLOT_COUNT];
        slots[Slot::Blue1.index()].team_id = 973;
        status.record(slots);

        assert!(status.initialized);
        assert_eq!(status.slot(Slot::Blue1).team_id, 973);
        assert_eq!(status.linked_team_count(), 1);
    }
}
