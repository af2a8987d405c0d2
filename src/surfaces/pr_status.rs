//! Pull request status: references in the title or description must
//! resolve, plus linking picked issues into the description.

use super::{
    PageLoad, PageSession, StatusBlock, SurfaceError, configuration_warning,
    session::require_credentials,
};
use crate::host::{
    domain::{HostContext, PullRequest},
    ports::SourceControl,
};
use crate::reference::{
    domain::{IssueSnapshot, ValidationResult, extract_references},
    ports::IssueTracker,
    services::ReferenceValidationService,
};
use std::collections::HashSet;
use tracing::{info, warn};

/// Title shown when the pull request policy is disabled.
pub const PR_POLICY_NOT_ENFORCED: &str = "Pull request policy not enforced";
/// Title shown when the pull request references nothing.
pub const NO_PR_REFERENCES: &str = "No Linear work items referenced in PR";
/// Detail shown alongside [`NO_PR_REFERENCES`].
pub const REFERENCE_RECOMMENDED: &str = "Linear work item reference recommended";
/// Title shown when validation could not run.
pub const PR_VALIDATION_FAILED: &str = "Failed to validate Linear work items";
/// Detail shown alongside error statuses.
pub const CHECK_CONFIGURATION: &str = "Check extension configuration";

/// Validates the references in a pull request's title and description.
pub async fn evaluate_pull_request<T>(
    validator: &ReferenceValidationService<T>,
    pull_request: &PullRequest,
) -> StatusBlock
where
    T: IssueTracker + ?Sized,
{
    let references = extract_references(&pull_request.reference_text());
    if references.is_empty() {
        warn!("no Linear work items referenced in pull request");
        return StatusBlock::pending(NO_PR_REFERENCES).with_detail(REFERENCE_RECOMMENDED);
    }

    validation_status(&validator.validate_references(&references).await)
}

/// Renders a validation result: resolved ids on success, the error list
/// otherwise.
#[must_use]
pub fn validation_status(result: &ValidationResult) -> StatusBlock {
    if result.is_valid() {
        let items = result
            .work_items()
            .iter()
            .map(|reference| format!("✓ {}", reference.issue_id()));
        StatusBlock::success(result.message()).with_items(items.collect::<Vec<_>>())
    } else {
        StatusBlock::failed(result.message()).with_items(result.errors().to_vec())
    }
}

/// Runs the pull request status page.
///
/// The host's load acknowledgment is sent exactly once whatever happens.
pub async fn run_pr_status(
    session: &PageSession,
    source_control: &dyn SourceControl,
) -> StatusBlock {
    let mut page = session.begin();
    let status = match check_pull_request(session, &page, source_control).await {
        Ok(status) => status,
        Err(SurfaceError::NotConfigured) => configuration_warning(),
        Err(err) => {
            warn!(error = %err, "pull request status failed");
            StatusBlock::error(PR_VALIDATION_FAILED)
                .with_detail(CHECK_CONFIGURATION)
                .with_items([err.to_string()])
        }
    };
    page.acknowledge();
    status
}

async fn check_pull_request(
    session: &PageSession,
    page: &PageLoad<'_>,
    source_control: &dyn SourceControl,
) -> Result<StatusBlock, SurfaceError> {
    let context = page.handshake().await?;
    let config = session.stored_config(&context).await?;
    if !config.require_reference_in_pr {
        info!("pull request policy not enforced");
        return Ok(StatusBlock::info(PR_POLICY_NOT_ENFORCED));
    }
    require_credentials(&config)?;
    let pull_request = fetch_pull_request(source_control, &context).await?;
    let validator = session.validator(&config);
    Ok(evaluate_pull_request(&validator, &pull_request).await)
}

async fn fetch_pull_request(
    source_control: &dyn SourceControl,
    context: &HostContext,
) -> Result<PullRequest, SurfaceError> {
    let (project_id, repository_id, pull_request_id) = context
        .pull_request_target()
        .ok_or(SurfaceError::MissingPullRequestContext)?;
    Ok(source_control
        .pull_request(project_id, repository_id, pull_request_id)
        .await?)
}

/// Appends markdown reference lines for `issues` to a description.
///
/// Issues whose identifier is already referenced in `existing_text`, or
/// repeated within `issues`, are skipped. Returns the new description and
/// the number of lines added.
#[must_use]
pub fn append_issue_links(
    description: &str,
    existing_text: &str,
    issues: &[IssueSnapshot],
) -> (String, usize) {
    let mut seen: HashSet<String> = extract_references(existing_text)
        .into_iter()
        .map(|reference| reference.issue_id().to_owned())
        .collect();
    let lines: Vec<String> = issues
        .iter()
        .filter(|issue| seen.insert(issue.identifier.clone()))
        .map(IssueSnapshot::markdown_reference)
        .collect();
    if lines.is_empty() {
        return (description.to_owned(), 0);
    }

    let trimmed = description.trim_end();
    let block = lines.join("\n");
    let updated = if trimmed.is_empty() {
        block
    } else {
        format!("{trimmed}\n\n{block}")
    };
    (updated, lines.len())
}

/// Links `issues` into the pull request named by `context`.
///
/// Returns the number of issues added; the description is left untouched
/// when every issue is already referenced.
///
/// # Errors
///
/// Returns [`SurfaceError`] when the context is incomplete or the pull
/// request cannot be read or updated.
pub async fn link_issues(
    source_control: &dyn SourceControl,
    context: &HostContext,
    issues: &[IssueSnapshot],
) -> Result<usize, SurfaceError> {
    let (project_id, repository_id, pull_request_id) = context
        .pull_request_target()
        .ok_or(SurfaceError::MissingPullRequestContext)?;
    let pull_request = source_control
        .pull_request(project_id, repository_id, pull_request_id)
        .await?;
    let (description, added) = append_issue_links(
        &pull_request.description,
        &pull_request.reference_text(),
        issues,
    );
    if added > 0 {
        source_control
            .update_pull_request_description(
                project_id,
                repository_id,
                pull_request_id,
                &description,
            )
            .await?;
        info!(pull_request_id, added, "linked Linear issues to pull request");
    }
    Ok(added)
}
