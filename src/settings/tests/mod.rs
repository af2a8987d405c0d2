//! Unit tests for the settings module.

mod config_tests;
mod local_store_tests;
