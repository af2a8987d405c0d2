//! Check-in policy: every commit must reference a valid Linear issue.

use super::{
    PageLoad, PageSession, StatusBlock, SurfaceError, configuration_warning,
    session::require_credentials,
};
use crate::host::domain::CommitInfo;
use crate::reference::{ports::IssueTracker, services::ReferenceValidationService};
use crate::settings::domain::IntegrationConfig;
use tracing::{info, warn};

/// Title shown when the commit policy is disabled.
pub const POLICY_NOT_ENFORCED: &str = "Check-in policy not enforced";
/// Title shown when there are no commits to check.
pub const NO_COMMITS: &str = "No commits to validate";
/// Title shown when every commit passes.
pub const ALL_COMMITS_VALID: &str = "All commits validated successfully";
/// Title shown when at least one commit fails.
pub const COMMITS_MISSING_REFERENCES: &str =
    "Some commits are missing Linear work item references";
/// Title shown when the page cannot run the check.
pub const COMMIT_POLICY_FAILED: &str = "Failed to validate commits";

/// Validates `commits` against the commit policy in `config`.
///
/// Each commit's comment (or message) is validated independently and in
/// order; failures are itemized as `Commit <short id>: <summary>`.
pub async fn evaluate_commits<T>(
    validator: &ReferenceValidationService<T>,
    config: &IntegrationConfig,
    commits: &[CommitInfo],
) -> StatusBlock
where
    T: IssueTracker + ?Sized,
{
    if !config.require_reference_in_commits {
        info!("check-in policy not enforced");
        return StatusBlock::info(POLICY_NOT_ENFORCED);
    }
    if commits.is_empty() {
        return StatusBlock::info(NO_COMMITS);
    }

    let mut failures = Vec::new();
    for commit in commits {
        let result = validator.validate_text(commit.text()).await;
        if !result.is_valid() {
            failures.push(format!("Commit {}: {}", commit.short_id(), result.message()));
        }
    }

    if failures.is_empty() {
        info!(commits = commits.len(), "all commits reference valid issues");
        StatusBlock::success(ALL_COMMITS_VALID)
    } else {
        warn!(failed = failures.len(), "check-in policy failed");
        StatusBlock::failed(COMMITS_MISSING_REFERENCES).with_items(failures)
    }
}

/// Runs the commit policy page: handshake, settings, validation.
///
/// The host's load acknowledgment is sent exactly once whatever happens.
pub async fn run_commit_policy(session: &PageSession) -> StatusBlock {
    let mut page = session.begin();
    let status = match check_commits(session, &page).await {
        Ok(status) => status,
        Err(SurfaceError::NotConfigured) => configuration_warning(),
        Err(err) => {
            warn!(error = %err, "commit policy page failed");
            StatusBlock::error(COMMIT_POLICY_FAILED).with_detail(err.to_string())
        }
    };
    page.acknowledge();
    status
}

async fn check_commits(
    session: &PageSession,
    page: &PageLoad<'_>,
) -> Result<StatusBlock, SurfaceError> {
    let context = page.handshake().await?;
    let config = session.stored_config(&context).await?;
    if config.require_reference_in_commits {
        require_credentials(&config)?;
    }
    let validator = session.validator(&config);
    Ok(evaluate_commits(&validator, &config, &context.commits).await)
}
