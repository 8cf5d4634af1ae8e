//! Desired slot assignments

use crate::slot::{Slot, SLOT_COUNT};
use crate::team::{TeamId, TeamIdError, TeamRef};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid team for slot {slot}: {source}")]
pub struct AssignmentError {
    pub slot: Slot,
    #[source]
    pub source: TeamIdError,
}

/// The teams a caller wants configured right now, one entry per slot.
///
/// Assignments describe an end state, not a delta, so a newer assignment
/// fully supersedes an older one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesiredAssignment([TeamRef; SLOT_COUNT]);

impl DesiredAssignment {
    /// An assignment with every slot empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from raw team numbers, where `None` or `0` mean an empty slot.
    pub fn from_numbers(numbers: [Option<u32>; SLOT_COUNT]) -> Result<Self, AssignmentError> {
        let mut teams = [None; SLOT_COUNT];
        for (slot, number) in Slot::all().zip(numbers) {
            teams[slot.index()] = match number {
                None | Some(0) => None,
                Some(n) => {
                    let team = TeamId::new(n)
                        .map_err(|source| AssignmentError { slot, source })?;
                    Some(team)
                }
            };
        }
        Ok(Self(teams))
    }

    pub fn team(&self, slot: Slot) -> TeamRef {
        self.0[slot.index()]
    }

    /// Replace one slot's team, returning the updated assignment.
    pub fn with_team(mut self, slot: Slot, team: TeamRef) -> Self {
        self.0[slot.index()] = team;
        self
    }

    /// Slots paired with their team, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, TeamRef)> + '_ {
        Slot::all().map(move |slot| (slot, self.team(slot)))
    }

    /// Only the occupied slots.
    pub fn occupied(&self) -> impl Iterator<Item = (Slot, TeamId)> + '_ {
        self.iter().filter_map(|(slot, team)| team.map(|t| (slot, t)))
    }
}

impl std::fmt::Display for DesiredAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, team) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match team {
                Some(team) => write!(f, "{team}")?,
                None => write!(f, "-")?,
            }
        }
        write!(f, "]")
    }
}
