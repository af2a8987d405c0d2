//! Port contracts for host collaborators.

pub mod lifecycle;
pub mod source_control;

pub use lifecycle::{HostError, HostLifecycle, HostResult};
pub use source_control::{SourceControl, SourceControlError, SourceControlResult};
