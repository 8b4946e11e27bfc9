//! End-to-end tests for sheet-parity.
//!
//! Each test writes the XLSX packages it needs into a temporary directory,
//! then runs the public entry points on the files.

mod common;
mod comparison;
mod errors;
mod reading;

// Re-export common utilities for submodules
pub use common::*;
