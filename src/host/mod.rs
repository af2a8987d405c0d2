//! Boundary with the Azure DevOps extension host.
//!
//! The host owns page lifecycle (initialization handshake, readiness, the
//! load-succeeded acknowledgment), the injected page context and
//! source-control data. This module describes those collaborators as ports
//! and provides in-memory adapters:
//!
//! - Host-provided data in [`domain`]
//! - Lifecycle and source-control contracts in [`ports`]
//! - In-memory hosts in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
