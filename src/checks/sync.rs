//! Sync & cleanliness check
//!
//! 1. `git pull --ff-only` so cleanliness is judged against an up-to-date copy;
//!    if the pull moves HEAD the project was read from an older commit and the
//!    release is refused
//! 2. `git status --short --branch` must not report the branch as ahead
//! 3. `git status --porcelain` must be empty
//!
//! All three run in order; the first failure aborts.

use super::trait_def::{CheckContext, ReleaseCheck};
use crate::core::error::{DirtyState, GateError, GateResult};
use crate::core::vcs::{StatusFormat, ensure_success};
use crate::release::state::ReleaseState;

pub struct SyncCheck;

impl ReleaseCheck for SyncCheck {
  fn name(&self) -> &'static str {
    "sync-clean"
  }

  fn description(&self) -> &'static str {
    "Local branch is synchronised, pushed and free of modifications"
  }

  fn reaches(&self) -> ReleaseState {
    ReleaseState::SyncedClean
  }

  fn run(&self, ctx: &CheckContext<'_>) -> GateResult<()> {
    let before = head(ctx)?;
    ensure_success(ctx.vcs.pull()?, "git pull")?;

    // The project facts were read from the pre-pull tree
    let after = head(ctx)?;
    if before != after {
      return Err(GateError::DirtyState(DirtyState::UpdatedByPull { before, after }));
    }

    let short = ensure_success(ctx.vcs.status(StatusFormat::Short)?, "git status --short --branch")?;
    if reports_ahead(&short.output) {
      return Err(GateError::DirtyState(DirtyState::UnpushedCommits { status: short.output }));
    }

    let porcelain = ensure_success(ctx.vcs.status(StatusFormat::Porcelain)?, "git status --porcelain")?;
    if !porcelain.output.trim().is_empty() {
      return Err(GateError::DirtyState(DirtyState::UncommittedChanges {
        status: porcelain.output,
      }));
    }

    Ok(())
  }
}

fn head(ctx: &CheckContext<'_>) -> GateResult<String> {
  let result = ensure_success(ctx.vcs.head()?, "git rev-parse HEAD")?;
  Ok(result.output.trim().to_string())
}

/// Case-insensitive search for the "ahead" marker
fn reports_ahead(short_status: &str) -> bool {
  short_status.to_lowercase().contains("ahead")
}
