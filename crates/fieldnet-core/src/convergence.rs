//! Convergence predicate

use crate::assignment::DesiredAssignment;
use crate::status::ObservedStatus;

/// Returns true when the observed status satisfies the desired assignment.
///
/// Status that has never been read successfully never converges. Empty
/// desired slots are not checked: a leftover team observed there does not
/// block convergence.
pub fn converged(desired: &DesiredAssignment, observed: &ObservedStatus) -> bool {
    if !observed.initialized {
        return false;
    }

    desired
        .occupied()
        .all(|(slot, team)| observed.slot(slot).team_id == team.get())
}
