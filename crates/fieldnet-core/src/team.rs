//! Team identifiers

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for out-of-range team numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TeamIdError {
    #[error("team number must be positive")]
    Zero,
    #[error("team number {0} exceeds maximum {max}", max = TeamId::MAX)]
    TooLarge(u32),
}

/// Team number (1-25599).
///
/// The upper bound keeps `team / 100` within a single IPv4 octet, since the
/// team's subnet is `10.{team / 100}.{team % 100}.0/24`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TeamId(u32);

impl TeamId {
    pub const MAX: u32 = 25_599;

    pub fn new(id: u32) -> Result<Self, TeamIdError> {
        match id {
            0 => Err(TeamIdError::Zero),
            id if id > Self::MAX => Err(TeamIdError::TooLarge(id)),
            id => Ok(Self(id)),
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for TeamId {
    type Error = TeamIdError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for u32 {
    fn from(team: TeamId) -> Self {
        team.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A slot's team, or `None` when the slot is empty.
pub type TeamRef = Option<TeamId>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_validation() {
        assert!(TeamId::new(1).is_ok());
        assert!(TeamId::new(254).is_ok());
        assert!(TeamId::new(TeamId::MAX).is_ok());
        assert_eq!(TeamId::new(0), Err(TeamIdError::Zero));
        assert_eq!(TeamId::new(25_600), Err(TeamIdError::TooLarge(25_600)));
    }

    #[test]
    fn test_team_id_serde() {
        let team: TeamId = serde_json::from_str("254").unwrap();
        assert_eq!(team.get(), 254);
        assert_eq!(serde_json::to_string(&team).unwrap(), "254");
        assert!(serde_json::from_str::<TeamId>("0").is_err());
    }
}
