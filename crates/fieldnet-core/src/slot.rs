//! Field slots
//!
//! The six fixed positions a team can occupy on the field network.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Number of slots on the field.
pub const SLOT_COUNT: usize = 6;

/// A fixed driver station position.
///
/// The declaration order defines the slot index used by every array in this
/// crate, so it must not change.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Slot {
    Red1,
    Red2,
    Red3,
    Blue1,
    Blue2,
    Blue3,
}

impl Slot {
    /// Stable index of this slot (0-5).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Slot at the given index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// All slots in index order.
    pub fn all() -> impl Iterator<Item = Slot> {
        Self::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_slot_index_roundtrip() {
        for (i, slot) in Slot::all().enumerate() {
            assert_eq!(slot.index(), i);
            assert_eq!(Slot::from_index(i), Some(slot));
        }
        assert_eq!(Slot::all().count(), SLOT_COUNT);
        assert_eq!(Slot::from_index(SLOT_COUNT), None);
    }

    #[test]
    fn test_slot_names() {
        assert_eq!(Slot::Red1.to_string(), "red1");
        assert_eq!(Slot::Blue3.as_ref(), "blue3");
        assert_eq!(Slot::from_str("blue2").unwrap(), Slot::Blue2);
        assert!(Slot::from_str("green1").is_err());
    }
}
