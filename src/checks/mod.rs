//! Release preconditions
//!
//! Every stage before tagging implements the `ReleaseCheck` trait. The engine
//! runs them in the order returned by [`release_checks`]; the order is part of
//! the contract (nothing is read from git before the guard passes, and tags
//! are only compared after the local copy is synchronised).
//!
//! # Built-in Checks
//!
//! - **repository-guard**: `.git` exists and a publish workflow is configured
//! - **sync-clean**: pull succeeds, nothing unpushed, nothing uncommitted
//! - **tag-available**: the version is not already tagged
//! - **no-integration-deps**: no plugin or artifact dependency is a pre-release

mod integration;
mod repository;
mod sync;
mod tags;
mod trait_def;

pub use repository::verify_root;
pub use trait_def::{CheckContext, ReleaseCheck};

/// Checks in execution order
pub fn release_checks() -> Vec<Box<dyn ReleaseCheck>> {
  vec![
    Box::new(repository::RepositoryGuard),
    Box::new(sync::SyncCheck),
    Box::new(tags::TagAvailability),
    Box::new(integration::IntegrationVersions),
  ]
}
