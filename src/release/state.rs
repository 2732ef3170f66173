//! Release state machine
//!
//! `Start → GuardOk → SyncedClean → TagAvailable → NoIntegrationDeps → Tagged → Published`
//!
//! Any stage may fail instead of advancing. `Tagged` is the point of no
//! automatic return: from there on the release exists in git even if
//! publishing fails.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseState {
  Start,
  GuardOk,
  SyncedClean,
  TagAvailable,
  NoIntegrationDeps,
  Tagged,
  Published,
}

impl ReleaseState {
  /// Whether the release has been recorded in git
  pub fn is_tagged(self) -> bool {
    self >= ReleaseState::Tagged
  }
}

impl fmt::Display for ReleaseState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      ReleaseState::Start => "start",
      ReleaseState::GuardOk => "guard-ok",
      ReleaseState::SyncedClean => "synced-clean",
      ReleaseState::TagAvailable => "tag-available",
      ReleaseState::NoIntegrationDeps => "no-integration-deps",
      ReleaseState::Tagged => "tagged",
      ReleaseState::Published => "published",
    };
    write!(f, "{}", label)
  }
}
