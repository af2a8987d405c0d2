//! Per-reference outcomes and the aggregate validation result.

use super::{IssueReference, IssueSnapshot};
use serde::Serialize;

/// Summary used when no tracker credentials are configured.
pub const NOT_CONFIGURED_MESSAGE: &str = "integration not configured";
/// Error entry used when no tracker credentials are configured.
pub const NOT_CONFIGURED_ERROR: &str = "credentials not configured";
/// Summary used when the source text contains no references.
pub const NO_REFERENCES_MESSAGE: &str = "no references found";
/// Error entry used when the source text contains no references.
pub const NO_REFERENCES_ERROR: &str = "no issue references found in source text";

/// Result of validating a single reference against the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceOutcome {
    /// The tracker resolved the reference.
    Resolved(IssueSnapshot),
    /// The tracker answered but has no such issue.
    NotFound,
    /// The tracker could not answer.
    Failed(String),
}

impl ReferenceOutcome {
    /// Returns `true` when the reference resolved to an issue.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Returns the resolved issue, if any.
    #[must_use]
    pub const fn issue(&self) -> Option<&IssueSnapshot> {
        match self {
            Self::Resolved(issue) => Some(issue),
            Self::NotFound | Self::Failed(_) => None,
        }
    }

    /// Returns the human-readable failure for `reference`, if any.
    #[must_use]
    pub fn error(&self, reference: &IssueReference) -> Option<String> {
        match self {
            Self::Resolved(_) => None,
            Self::NotFound => Some(format!("Issue {} not found", reference.issue_id())),
            Self::Failed(reason) => Some(format!(
                "Failed to validate {}: {reason}",
                reference.issue_id()
            )),
        }
    }
}

/// Aggregate verdict for a batch of references.
///
/// `is_valid` holds exactly when at least one reference resolved and none
/// failed. Both lists keep the order of the input references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    message: String,
    work_items: Vec<IssueReference>,
    errors: Vec<String>,
}

impl ValidationResult {
    /// Result returned when the tracker has no credentials.
    #[must_use]
    pub fn not_configured() -> Self {
        Self {
            is_valid: false,
            message: NOT_CONFIGURED_MESSAGE.to_owned(),
            work_items: Vec::new(),
            errors: vec![NOT_CONFIGURED_ERROR.to_owned()],
        }
    }

    /// Result returned when there is nothing to validate.
    #[must_use]
    pub fn no_references() -> Self {
        Self {
            is_valid: false,
            message: NO_REFERENCES_MESSAGE.to_owned(),
            work_items: Vec::new(),
            errors: vec![NO_REFERENCES_ERROR.to_owned()],
        }
    }

    /// Aggregates per-reference outcomes, preserving input order.
    #[must_use]
    pub fn from_outcomes<'a>(
        outcomes: impl IntoIterator<Item = (&'a IssueReference, ReferenceOutcome)>,
    ) -> Self {
        let mut work_items = Vec::new();
        let mut errors = Vec::new();
        for (reference, outcome) in outcomes {
            match outcome.error(reference) {
                None => work_items.push(reference.clone()),
                Some(error) => errors.push(error),
            }
        }

        let is_valid = !work_items.is_empty() && errors.is_empty();
        let message = if is_valid {
            format!("Found {} valid issue(s)", work_items.len())
        } else {
            format!("Validation failed: {}", errors.join(", "))
        };

        Self {
            is_valid,
            message,
            work_items,
            errors,
        }
    }

    /// Returns the overall verdict.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Returns the summary message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the references that resolved, in input order.
    #[must_use]
    pub fn work_items(&self) -> &[IssueReference] {
        &self.work_items
    }

    /// Returns the failure reasons, in input order.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
