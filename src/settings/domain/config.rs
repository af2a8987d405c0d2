//! Persisted Linear integration configuration.

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage key of the configuration blob.
pub const SETTINGS_KEY: &str = "linear-config";

/// Linear API key.
///
/// The key is persisted verbatim but never shown by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw API key.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw key.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the key is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            f.write_str("ApiKey(<empty>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}

/// Linear integration settings for one scope.
///
/// Missing fields take their defaults when a stored blob is read, so partial
/// blobs written by older versions still load. The pre-rename policy field
/// names are accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntegrationConfig {
    /// Linear API key.
    pub api_key: ApiKey,
    /// Optional Linear organization id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Whether commits must reference a Linear issue.
    #[serde(alias = "requireWorkItemInCommits")]
    pub require_reference_in_commits: bool,
    /// Whether pull requests must reference a Linear issue.
    #[serde(rename = "requireReferenceInPR", alias = "requireWorkItemInPR")]
    pub require_reference_in_pr: bool,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            organization_id: None,
            require_reference_in_commits: true,
            require_reference_in_pr: true,
        }
    }
}

impl IntegrationConfig {
    /// Creates a configuration with `api_key` and default policies.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
            ..Self::default()
        }
    }

    /// Returns `true` when an API key is present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_blank()
    }

    /// Returns the organization id, treating a blank value as absent.
    #[must_use]
    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Checks that the configuration can be saved.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::MissingApiKey`] when the API key is
    /// blank.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.has_credentials() {
            Ok(())
        } else {
            Err(ConfigValidationError::MissingApiKey)
        }
    }
}
