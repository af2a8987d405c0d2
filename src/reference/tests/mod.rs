//! Unit tests for the reference module.
//!
//! Tests are organised by component: the extractor, the domain value
//! objects, the validation pipeline and the tracker adapters.
