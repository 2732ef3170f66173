//! Tag writer
//!
//! Creates the annotated release tag at HEAD. This is the release-defining
//! side effect: once it succeeds the release exists in git, whatever happens
//! to publishing afterwards.

use crate::core::context::Project;
use crate::core::error::{GateError, GateResult, VcsError};
use crate::core::vcs::VcsClient;

/// Create tag `<version>` with message `Release version [<version>].`, returning the tag name
pub fn write_tag(project: &Project, vcs: &dyn VcsClient) -> GateResult<String> {
  let tag = project.version.tag_name();
  let result = vcs.tag(&tag, &project.version.tag_message())?;

  if !result.success() {
    return Err(GateError::Vcs(VcsError::CommandFailed {
      command: format!("git tag -a {}", tag),
      output: format!("Unable to create tag '{}'\n{}", tag, result.output),
    }));
  }

  Ok(tag)
}

/// Remove a tag written by [`write_tag`]; used only when rollback is enabled
pub fn remove_tag(vcs: &dyn VcsClient, tag: &str) -> GateResult<()> {
  let result = vcs.delete_tag(tag)?;
  if !result.success() {
    return Err(GateError::Vcs(VcsError::CommandFailed {
      command: format!("git tag -d {}", tag),
      output: result.output,
    }));
  }
  Ok(())
}
