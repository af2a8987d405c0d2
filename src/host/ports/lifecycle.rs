//! Extension host lifecycle port.

use crate::host::domain::{ExtensionContext, HostContext, PickedIssue};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for host lifecycle operations.
pub type HostResult<T> = Result<T, HostError>;

/// Page lifecycle services offered by the extension host.
#[async_trait]
pub trait HostLifecycle: Send + Sync {
    /// Starts the initialization handshake.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Handshake`] when the host does not respond.
    async fn init(&self) -> HostResult<()>;

    /// Resolves once the host is interactive.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Handshake`] when readiness is never reached.
    async fn ready(&self) -> HostResult<()>;

    /// Dismisses the host's loading indicator.
    ///
    /// Must be called exactly once per page load, on success and failure
    /// paths alike.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Notify`] when the host rejects the call.
    fn notify_load_succeeded(&self) -> HostResult<()>;

    /// Returns the context the host injected into this page.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Configuration`] when no context is available.
    async fn configuration(&self) -> HostResult<HostContext>;

    /// Returns the identity of the running extension.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Configuration`] when the host has not supplied
    /// it.
    fn extension_context(&self) -> HostResult<ExtensionContext>;

    /// Closes the host-managed dialog hosting this page with `picked`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Dialog`] when the page is not inside a dialog.
    fn close_dialog(&self, picked: &PickedIssue) -> HostResult<()>;
}

/// Errors returned by host lifecycle adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The initialization or readiness handshake failed.
    #[error("host handshake failed: {0}")]
    Handshake(String),

    /// The page context or extension identity is unavailable.
    #[error("host configuration unavailable: {0}")]
    Configuration(String),

    /// The load acknowledgment could not be delivered.
    #[error("failed to notify host: {0}")]
    Notify(String),

    /// No dialog is available to close.
    #[error("host dialog unavailable: {0}")]
    Dialog(String),
}
