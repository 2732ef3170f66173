//! Repository guard
//!
//! Pure precondition: the project root must hold git metadata and a publish
//! workflow must be configured. Runs no commands.

use super::trait_def::{CheckContext, ReleaseCheck};
use crate::core::config::PublishWorkflow;
use crate::core::error::{ConfigError, GateError, GateResult};
use crate::release::state::ReleaseState;
use std::path::Path;

pub struct RepositoryGuard;

impl ReleaseCheck for RepositoryGuard {
  fn name(&self) -> &'static str {
    "repository-guard"
  }

  fn description(&self) -> &'static str {
    "Project is a git repository with a publish workflow"
  }

  fn reaches(&self) -> ReleaseState {
    ReleaseState::GuardOk
  }

  fn run(&self, ctx: &CheckContext<'_>) -> GateResult<()> {
    verify_root(ctx.project.root(), ctx.project.publish.as_ref())
  }
}

/// Guard condition on its own, usable before cargo metadata is loaded
pub fn verify_root(root: &Path, publish: Option<&PublishWorkflow>) -> GateResult<()> {
  // `.git` is a directory in normal clones and a file in worktrees/submodules
  if !root.join(".git").exists() {
    return Err(GateError::Config(ConfigError::NotARepository {
      path: root.to_path_buf(),
    }));
  }

  if publish.is_none() {
    return Err(GateError::Config(ConfigError::MissingPublishWorkflow));
  }

  Ok(())
}
