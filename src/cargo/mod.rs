//! Cargo integration
//!
//! - **metadata**: Load the package being released, its build-time plugins and
//!   its resolved dependency graph using cargo_metadata

pub mod metadata;
