//! Host adapters.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryHost`]: scripted lifecycle host recording every call
//! - [`memory::InMemorySourceControl`]: pull request store

pub mod memory;
