//! Validation errors for integration settings.

use thiserror::Error;

/// Errors returned when a configuration cannot be saved or used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// The API key is empty or whitespace.
    #[error("Linear API key is required")]
    MissingApiKey,

    /// The settings scope is empty.
    #[error("settings scope must not be empty")]
    EmptyScope,
}
