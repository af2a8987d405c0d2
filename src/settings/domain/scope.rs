//! Storage scope for settings values.

use super::ConfigValidationError;
use std::fmt;

/// Scope under which a settings value is stored, usually a project id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingsScope(String);

impl SettingsScope {
    /// Creates a scope from a project or extension identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::EmptyScope`] for blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigValidationError::EmptyScope);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the scope identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a file-name-safe form of the scope.
    #[must_use]
    pub fn file_stem(&self) -> String {
        safe_file_stem(&self.0)
    }
}

/// Maps `raw` to a single safe path segment.
///
/// Characters outside `[A-Za-z0-9._-]` become `_`; empty or dot-leading
/// results gain a `_` prefix so they never name a hidden or parent directory.
pub(crate) fn safe_file_stem(raw: &str) -> String {
    let mut stem: String = raw
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() || stem.starts_with('.') {
        stem.insert(0, '_');
    }
    stem
}

impl fmt::Display for SettingsScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
