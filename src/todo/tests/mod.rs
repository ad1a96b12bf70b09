//! Unit tests for the todo module.
//!
//! Tests are organised by layer: value objects, lifecycle transitions, the
//! query engine, the JSON store, and service orchestration.

mod store_tests;
mod support;
