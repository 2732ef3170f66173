//! Core building blocks for cargo-gate
//!
//! - **config**: gate.toml parsing and validation
//! - **context**: immutable project facts shared by every release stage
//! - **error**: error types with exit codes and contextual help messages
//! - **process**: bounded subprocess execution with captured output
//! - **vcs**: version-control abstraction (SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod process;
pub mod vcs;
