//! Unit tests for the surface controllers.

mod issue_list_tests;
mod settings_page_tests;
