//! Core shared types for fieldnet
//!
//! This crate contains the slot model, team identifiers, desired assignments,
//! observed device status and the convergence predicate shared by every
//! fieldnet component.

mod assignment;
mod convergence;
mod slot;
mod status;
mod subnet;
mod team;

pub use assignment::{AssignmentError, DesiredAssignment};
pub use convergence::converged;
pub use slot::{Slot, SLOT_COUNT};
pub use status::{parse_team_id, ObservedStatus, SlotStatus};
pub use subnet::SlotSubnet;
pub use team::{TeamId, TeamIdError, TeamRef};
