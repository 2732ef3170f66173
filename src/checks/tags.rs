//! Tag availability check
//!
//! Fetches remote tags, then refuses the release if the version is already
//! tagged. Only the local tag-ref cache is touched.

use super::trait_def::{CheckContext, ReleaseCheck};
use crate::core::error::{GateError, GateResult};
use crate::core::vcs::ensure_success;
use crate::release::state::ReleaseState;

pub struct TagAvailability;

impl ReleaseCheck for TagAvailability {
  fn name(&self) -> &'static str {
    "tag-available"
  }

  fn description(&self) -> &'static str {
    "Release version has not been tagged yet"
  }

  fn reaches(&self) -> ReleaseState {
    ReleaseState::TagAvailable
  }

  fn run(&self, ctx: &CheckContext<'_>) -> GateResult<()> {
    ensure_success(ctx.vcs.fetch_tags()?, "git fetch --tags")?;

    let tag = ctx.project.version.tag_name();
    if ctx.vcs.tag_exists(&tag)? {
      return Err(GateError::DuplicateRelease { version: tag });
    }

    Ok(())
  }
}
