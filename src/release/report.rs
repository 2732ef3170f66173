//! Machine-readable run summaries for `--json`

use crate::core::error::GateError;
use crate::release::state::ReleaseState;
use crate::release::version::ReleaseVersion;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of a successful `check` or `release` run
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseReport {
  pub package: String,
  pub version: ReleaseVersion,
  /// Tag written by this run (absent for `check`)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tag: Option<String>,
  pub state: ReleaseState,
  /// Names of the checks that passed, in execution order
  pub checks: Vec<&'static str>,
  pub published: Vec<String>,
  pub started_at: DateTime<Utc>,
  pub finished_at: DateTime<Utc>,
}

/// JSON body printed on stdout when a `--json` run fails
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
  pub error: &'static str,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub help: Option<String>,
  pub exit_code: i32,
  /// State the release reached in git before failing (absent when untagged)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub state: Option<ReleaseState>,
  /// Whether a tag for this version was left in the repository
  pub tagged: bool,
}

impl From<&GateError> for FailureReport {
  fn from(err: &GateError) -> Self {
    Self {
      error: err.kind(),
      message: err.to_string(),
      help: err.help_message(),
      exit_code: err.exit_code().as_i32(),
      state: err.reached_state(),
      tagged: err.reached_state().is_some_and(ReleaseState::is_tagged),
    }
  }
}
