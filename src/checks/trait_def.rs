//! Check trait abstraction for release preconditions
//!
//! Each pre-tag stage of a release implements [`ReleaseCheck`]. Checks are
//! fail-fast: the first error aborts the release, and no check after it runs.
//! A passing check advances the release to the state it names in `reaches`.

use crate::core::context::Project;
use crate::core::error::GateResult;
use crate::core::vcs::VcsClient;
use crate::release::state::ReleaseState;

/// Context passed to checks
pub struct CheckContext<'a> {
  /// Immutable project facts
  pub project: &'a Project,
  /// Version-control runner (fresh state on every call)
  pub vcs: &'a dyn VcsClient,
}

/// Release precondition
///
/// # Example
///
/// ```rust,ignore
/// struct BranchIsMain;
///
/// impl ReleaseCheck for BranchIsMain {
///   fn name(&self) -> &'static str {
///     "branch-is-main"
///   }
///
///   fn description(&self) -> &'static str {
///     "Releases are cut from main"
///   }
///
///   fn reaches(&self) -> ReleaseState {
///     ReleaseState::SyncedClean
///   }
///
///   fn run(&self, ctx: &CheckContext<'_>) -> GateResult<()> {
///     Ok(())
///   }
/// }
/// ```
pub trait ReleaseCheck: Send + Sync {
  /// Unique name for this check (kebab-case)
  fn name(&self) -> &'static str;

  /// Human-readable description of what this check validates
  fn description(&self) -> &'static str;

  /// State the release reaches once this check passes
  fn reaches(&self) -> ReleaseState;

  /// Run the check; `Err` aborts the release
  fn run(&self, ctx: &CheckContext<'_>) -> GateResult<()>;
}
