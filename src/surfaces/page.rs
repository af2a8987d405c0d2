//! Page-load acknowledgment guard.

use crate::host::{
    domain::HostContext,
    ports::{HostLifecycle, HostResult},
};
use tracing::{debug, warn};

/// Tracks one page load and sends the host's load-succeeded acknowledgment
/// exactly once.
///
/// The acknowledgment is sent by [`PageLoad::acknowledge`] or, failing
/// that, when the guard is dropped, so early returns and error paths still
/// dismiss the host's loading indicator.
pub struct PageLoad<'a> {
    host: &'a dyn HostLifecycle,
    acknowledged: bool,
}

impl<'a> PageLoad<'a> {
    /// Starts tracking a page load on `host`.
    #[must_use]
    pub const fn new(host: &'a dyn HostLifecycle) -> Self {
        Self {
            host,
            acknowledged: false,
        }
    }

    /// Runs the init and readiness handshake, then reads the page context.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::host::ports::HostError`] raised by the
    /// host.
    pub async fn handshake(&self) -> HostResult<HostContext> {
        self.host.init().await?;
        self.host.ready().await?;
        debug!("host ready");
        self.host.configuration().await
    }

    /// Sends the load acknowledgment if it has not been sent yet.
    ///
    /// A host that rejects the acknowledgment is logged and otherwise
    /// ignored.
    pub fn acknowledge(&mut self) {
        if self.acknowledged {
            return;
        }
        self.acknowledged = true;
        if let Err(err) = self.host.notify_load_succeeded() {
            warn!(error = %err, "host rejected load acknowledgment");
        }
    }

    /// Returns `true` once the acknowledgment has been sent.
    #[must_use]
    pub const fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }
}

impl Drop for PageLoad<'_> {
    fn drop(&mut self) {
        self.acknowledge();
    }
}
