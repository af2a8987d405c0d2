//! Domain model for issue references and their validation results.
//!
//! Everything here is pure: extraction never fails and performs no I/O, and
//! result types are immutable once built.

mod error;
mod extract;
mod issue;
mod outcome;
mod reference;

pub use error::ReferenceDomainError;
pub use extract::extract_references;
pub use issue::{IssueSnapshot, IssueState, IssueTeam, UNKNOWN_NAME};
pub use outcome::{
    NO_REFERENCES_ERROR, NO_REFERENCES_MESSAGE, NOT_CONFIGURED_ERROR, NOT_CONFIGURED_MESSAGE,
    ReferenceOutcome, ValidationResult,
};
pub use reference::{IssueNumber, IssueReference, REFERENCE_SEPARATOR, TeamKey};
