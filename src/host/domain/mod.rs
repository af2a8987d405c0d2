//! Data supplied by, or returned to, the extension host.

mod context;

pub use context::{CommitInfo, ExtensionContext, HostContext, PickedIssue, PullRequest};
