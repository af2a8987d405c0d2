//! Error types for issue reference construction.

use thiserror::Error;

/// Errors returned while constructing issue references from raw input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReferenceDomainError {
    /// The input does not follow the `TEAM-123` shape.
    #[error("invalid issue identifier '{0}', expected TEAM-123")]
    InvalidIdentifier(String),

    /// The team key is not 2 to 10 uppercase ASCII letters.
    #[error("invalid team key '{0}', expected 2 to 10 uppercase letters")]
    InvalidTeamKey(String),

    /// The issue number is not 1 to 6 ASCII digits.
    #[error("invalid issue number '{0}', expected 1 to 6 digits")]
    InvalidIssueNumber(String),
}
