//! Integration settings: the persisted Linear configuration and how it is
//! loaded and saved.
//!
//! Settings live in the host's key-value store under a fixed key, scoped per
//! project. Host storage is retried a bounded number of times before the
//! service falls back to a local store. The module follows hexagonal
//! architecture:
//!
//! - Configuration types in [`domain`]
//! - The key-value store contract in [`ports`]
//! - In-memory and local-file stores in [`adapters`]
//! - The retry-with-fallback service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
