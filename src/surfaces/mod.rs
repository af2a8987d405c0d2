//! Surface controllers rendered inside the host.
//!
//! Each surface runs the host handshake, loads settings, talks to the
//! tracker and produces a [`StatusBlock`] or an interactive model. Every
//! failure is converted into a rendered status, and the host's load
//! acknowledgment is sent exactly once per page load through
//! [`PageLoad`].
//!
//! - [`commit_policy`]: every commit references a valid issue
//! - [`pr_status`]: pull request references, plus issue linking
//! - [`pr_create`]: multi-select issue list for new pull requests
//! - [`picker`]: single-issue picker returned to a host dialog
//! - [`settings_page`]: configuration form

pub mod commit_policy;
pub mod issues;
mod page;
pub mod picker;
pub mod pr_create;
pub mod pr_status;
mod render;
mod session;
pub mod settings_page;
mod status;

pub use issues::{FilterScope, NO_ISSUES_FOUND, load_issues, matches_query};
pub use page::PageLoad;
pub use render::{RenderError, render_html, render_text};
pub use session::{
    LinearTrackerFactory, PageSession, SharedTracker, SurfaceError, TrackerFactory,
    configuration_warning,
};
pub use status::{StatusBlock, StatusLevel};

#[cfg(test)]
mod tests;
