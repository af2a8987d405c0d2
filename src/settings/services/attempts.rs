//! Bounded retry state for host settings storage.

/// Host store attempts made before falling back to local storage.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// How many times the host store is tried before falling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// Creates a policy allowing `max_attempts` host attempts.
    ///
    /// Zero is raised to one: the host store is always tried once.
    #[must_use]
    pub const fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
        }
    }

    /// Returns the number of host attempts allowed.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

/// Which store the next operation should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoragePhase {
    /// Try the host store; `attempt` counts from one.
    Host {
        /// Attempt number of the next host call.
        attempt: u32,
    },
    /// Host attempts are exhausted; use the local fallback store.
    Fallback,
}

/// Attempt counter driving the host-then-fallback sequence.
///
/// Starts at host attempt one. Each recorded host failure advances to the
/// next attempt until the policy is exhausted, after which the phase stays
/// [`StoragePhase::Fallback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageAttempts {
    policy: RetryPolicy,
    phase: StoragePhase,
}

impl StorageAttempts {
    /// Starts a new sequence under `policy`.
    #[must_use]
    pub const fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            phase: StoragePhase::Host { attempt: 1 },
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> StoragePhase {
        self.phase
    }

    /// Records a host failure and returns the next phase.
    pub const fn record_failure(&mut self) -> StoragePhase {
        self.phase = match self.phase {
            StoragePhase::Host { attempt } if attempt < self.policy.max_attempts() => {
                StoragePhase::Host {
                    attempt: attempt + 1,
                }
            }
            StoragePhase::Host { .. } | StoragePhase::Fallback => StoragePhase::Fallback,
        };
        self.phase
    }
}
