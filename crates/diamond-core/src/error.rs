//! Error types surfaced by the standings pipeline.
//!
//! Cache failures never appear here: the cache layer recovers from them
//! locally and reports a miss instead.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum StandingsError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Team {team_id} not found in current standings")]
    TeamNotFound { team_id: u32 },

    #[error("Team {team_id} appears more than once in the {season} standings")]
    DuplicateTeam { team_id: u32, season: i32 },

    #[error("Invalid year range: {start} is after {end}")]
    InvalidRange { start: i32, end: i32 },
}

impl StandingsError {
    /// Whether the user should be offered a retry.
    ///
    /// Only transient remote failures qualify; a missing team means a bad
    /// identifier and will not resolve itself.
    pub fn is_retryable(&self) -> bool {
        match self {
            StandingsError::Api(e) => e.is_transient(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, StandingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        let remote: StandingsError = ApiError::from_status(500, "").into();
        assert!(remote.is_retryable());

        let missing = StandingsError::TeamNotFound { team_id: 999 };
        assert!(!missing.is_retryable());
        assert_eq!(missing.to_string(), "Team 999 not found in current standings");
    }
}
