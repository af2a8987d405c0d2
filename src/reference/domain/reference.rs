//! Issue reference value objects.

use super::ReferenceDomainError;
use serde::Serialize;
use std::fmt;

/// Separator between the team key and the issue number.
pub const REFERENCE_SEPARATOR: char = '-';

const TEAM_KEY_MIN_LEN: usize = 2;
const TEAM_KEY_MAX_LEN: usize = 10;
const ISSUE_NUMBER_MIN_LEN: usize = 1;
const ISSUE_NUMBER_MAX_LEN: usize = 6;

/// Team key prefix of a Linear identifier, such as `LIN` in `LIN-123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TeamKey(String);

impl TeamKey {
    /// Creates a validated team key.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDomainError::InvalidTeamKey`] unless the value is
    /// 2 to 10 uppercase ASCII letters.
    pub fn new(value: impl Into<String>) -> Result<Self, ReferenceDomainError> {
        let raw = value.into();
        let is_valid = (TEAM_KEY_MIN_LEN..=TEAM_KEY_MAX_LEN).contains(&raw.len())
            && raw.bytes().all(|byte| byte.is_ascii_uppercase());
        if !is_valid {
            return Err(ReferenceDomainError::InvalidTeamKey(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric suffix of a Linear identifier, kept as text.
///
/// The digits are stored verbatim so that `LIN-007` round-trips exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IssueNumber(String);

impl IssueNumber {
    /// Creates a validated issue number.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDomainError::InvalidIssueNumber`] unless the value
    /// is 1 to 6 ASCII digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ReferenceDomainError> {
        let raw = value.into();
        let is_valid = (ISSUE_NUMBER_MIN_LEN..=ISSUE_NUMBER_MAX_LEN).contains(&raw.len())
            && raw.bytes().all(|byte| byte.is_ascii_digit());
        if !is_valid {
            return Err(ReferenceDomainError::InvalidIssueNumber(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the digits as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A mention of a Linear issue found in free text.
///
/// `issue_id` always equals `raw_text`; the team key and issue number are
/// its decomposition around the separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReference {
    issue_id: String,
    team_key: TeamKey,
    issue_number: IssueNumber,
    raw_text: String,
}

impl IssueReference {
    /// Creates a reference from validated components.
    #[must_use]
    pub fn new(team_key: TeamKey, issue_number: IssueNumber) -> Self {
        let raw_text = format!("{team_key}{REFERENCE_SEPARATOR}{issue_number}");
        Self {
            issue_id: raw_text.clone(),
            team_key,
            issue_number,
            raw_text,
        }
    }

    /// Builds a reference from components already matched by the extractor.
    pub(super) fn from_match(team_key: &str, issue_number: &str) -> Self {
        Self::new(
            TeamKey(team_key.to_owned()),
            IssueNumber(issue_number.to_owned()),
        )
    }

    /// Parses a complete identifier such as `LIN-123`.
    ///
    /// Surrounding whitespace is ignored; anything else around the
    /// identifier is rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`ReferenceDomainError`] when the input is not a single
    /// well-formed identifier.
    pub fn parse(value: &str) -> Result<Self, ReferenceDomainError> {
        let trimmed = value.trim();
        let (team_key, issue_number) = trimmed
            .split_once(REFERENCE_SEPARATOR)
            .ok_or_else(|| ReferenceDomainError::InvalidIdentifier(value.to_owned()))?;
        Ok(Self::new(
            TeamKey::new(team_key)?,
            IssueNumber::new(issue_number)?,
        ))
    }

    /// Returns the canonical identifier used for tracker lookups.
    #[must_use]
    pub fn issue_id(&self) -> &str {
        &self.issue_id
    }

    /// Returns the team key.
    #[must_use]
    pub const fn team_key(&self) -> &TeamKey {
        &self.team_key
    }

    /// Returns the issue number.
    #[must_use]
    pub const fn issue_number(&self) -> &IssueNumber {
        &self.issue_number
    }

    /// Returns the exact text that was matched.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

impl fmt::Display for IssueReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.issue_id)
    }
}
