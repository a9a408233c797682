//! Tests for the runtime
//!
//! Organized by component

mod cast_tests;
mod helpers;
