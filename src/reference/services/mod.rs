//! Application services for reference validation.

mod validation;

pub use validation::{ReferenceValidationService, validate_references};
