//! Version-control abstraction used by the release engine
//!
//! The engine needs six read/write operations plus tag deletion for the
//! optional rollback. [`SystemGit`] implements them by shelling out to git;
//! tests substitute an in-memory fake.

pub mod system_git;

pub use crate::core::process::CommandResult;
pub use system_git::SystemGit;

use crate::core::error::{GateError, GateResult, VcsError};

/// Which flavour of `git status` to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFormat {
  /// `git status --short --branch`, whose header line reports ahead/behind
  Short,
  /// `git status --porcelain`, empty when the tree is clean
  Porcelain,
}

/// Version-control command runner
///
/// Command-returning operations yield a [`CommandResult`] even when the command
/// exits non-zero; the caller decides what a failure means. An `Err` means the
/// command could not be run at all (missing binary, timeout).
pub trait VcsClient: Sync {
  /// Commit id of HEAD
  fn head(&self) -> GateResult<CommandResult>;

  /// Synchronise the current branch with its upstream
  fn pull(&self) -> GateResult<CommandResult>;

  /// Fetch every tag from the remote into the local tag refs
  fn fetch_tags(&self) -> GateResult<CommandResult>;

  /// Report working-copy status in the given format
  fn status(&self, format: StatusFormat) -> GateResult<CommandResult>;

  /// Create an annotated tag at HEAD
  fn tag(&self, name: &str, message: &str) -> GateResult<CommandResult>;

  /// Whether a tag with this exact name is known locally (after `fetch_tags`)
  fn tag_exists(&self, name: &str) -> GateResult<bool>;

  /// Delete a local tag
  fn delete_tag(&self, name: &str) -> GateResult<CommandResult>;
}

/// Turn a non-zero exit into a [`VcsError::CommandFailed`] carrying the captured output
pub fn ensure_success(result: CommandResult, command: &str) -> GateResult<CommandResult> {
  if result.success() {
    Ok(result)
  } else {
    Err(GateError::Vcs(VcsError::CommandFailed {
      command: command.to_string(),
      output: result.output,
    }))
  }
}
