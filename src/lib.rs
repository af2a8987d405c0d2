//! Trackline: Linear issue references for pull requests and commits.
//!
//! This crate finds Linear issue identifiers such as `LIN-123` in free
//! text, resolves them against the Linear API and renders the verdicts for
//! the pages an extension host embeds: a commit policy check, a pull
//! request status check, issue pickers and a settings form.
//!
//! # Architecture
//!
//! Trackline follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (Linear, host, files)
//!
//! # Modules
//!
//! - [`reference`]: Reference extraction and the validation pipeline
//! - [`settings`]: Integration configuration with retry and local fallback
//! - [`host`]: Extension host lifecycle and source-control ports
//! - [`surfaces`]: Page controllers and status rendering

pub mod host;
pub mod reference;
pub mod settings;
pub mod surfaces;
