//! Reference validation pipeline.

use crate::reference::{
    domain::{IssueReference, ReferenceOutcome, ValidationResult, extract_references},
    ports::IssueTracker,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Validates issue references against a tracker capability.
///
/// Lookups run one at a time in input order, so the work-item and error
/// lists of the result follow the order in which references were found.
/// Expected conditions (missing credentials, unknown issues, tracker
/// failures) are reported in the returned [`ValidationResult`], never as
/// errors.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use trackline::reference::adapters::memory::InMemoryIssueTracker;
/// use trackline::reference::services::ReferenceValidationService;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let tracker = InMemoryIssueTracker::new();
/// let service = ReferenceValidationService::new(Arc::new(tracker));
/// let result = service.validate_text("no refs here").await;
/// assert!(!result.is_valid());
/// assert_eq!(result.message(), "no references found");
/// # }
/// ```
pub struct ReferenceValidationService<T>
where
    T: IssueTracker + ?Sized,
{
    tracker: Arc<T>,
}

impl<T> Clone for ReferenceValidationService<T>
where
    T: IssueTracker + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            tracker: Arc::clone(&self.tracker),
        }
    }
}

impl<T> ReferenceValidationService<T>
where
    T: IssueTracker + ?Sized,
{
    /// Creates a validation service over a tracker capability.
    #[must_use]
    pub const fn new(tracker: Arc<T>) -> Self {
        Self { tracker }
    }

    /// Returns the tracker capability.
    #[must_use]
    pub const fn tracker(&self) -> &Arc<T> {
        &self.tracker
    }

    /// Validates a single reference.
    pub async fn validate_reference(&self, reference: &IssueReference) -> ReferenceOutcome {
        lookup(&*self.tracker, reference).await
    }

    /// Validates references in order and aggregates the outcome.
    pub async fn validate_references(&self, references: &[IssueReference]) -> ValidationResult {
        run_pipeline(&*self.tracker, references).await
    }

    /// Extracts references from `text` and validates them.
    pub async fn validate_text(&self, text: &str) -> ValidationResult {
        let references = extract_references(text);
        self.validate_references(&references).await
    }
}

/// Validates references against an optional tracker capability.
///
/// An absent tracker degrades to the "not configured" result so that
/// callers always receive something renderable.
pub async fn validate_references(
    references: &[IssueReference],
    tracker: Option<&dyn IssueTracker>,
) -> ValidationResult {
    match tracker {
        Some(capability) => run_pipeline(capability, references).await,
        None => {
            warn!("reference validation requested without a tracker capability");
            ValidationResult::not_configured()
        }
    }
}

async fn run_pipeline<T>(tracker: &T, references: &[IssueReference]) -> ValidationResult
where
    T: IssueTracker + ?Sized,
{
    if !tracker.is_initialized() {
        warn!("tracker credentials are not configured");
        return ValidationResult::not_configured();
    }

    if references.is_empty() {
        debug!("no issue references to validate");
        return ValidationResult::no_references();
    }

    let mut outcomes = Vec::with_capacity(references.len());
    for reference in references {
        outcomes.push((reference, lookup(tracker, reference).await));
    }

    let result = ValidationResult::from_outcomes(outcomes);
    info!(
        valid = result.is_valid(),
        work_items = result.work_items().len(),
        errors = result.errors().len(),
        "reference validation finished"
    );
    result
}

async fn lookup<T>(tracker: &T, reference: &IssueReference) -> ReferenceOutcome
where
    T: IssueTracker + ?Sized,
{
    debug!(issue_id = reference.issue_id(), "looking up issue reference");
    match tracker.lookup_by_id(reference.issue_id()).await {
        Ok(Some(issue)) => ReferenceOutcome::Resolved(issue),
        Ok(None) => ReferenceOutcome::NotFound,
        Err(err) => {
            warn!(issue_id = reference.issue_id(), error = %err, "issue lookup failed");
            ReferenceOutcome::Failed(err.to_string())
        }
    }
}
