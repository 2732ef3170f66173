//! Release version identifier
//!
//! Version parsing and ordering are delegated to `semver`; the engine only asks
//! two questions of a version: what tag string it maps to, and whether it is an
//! integration (pre-release) build.

use serde::{Serialize, Serializer};
use std::fmt;

/// A version that can be tagged and checked for pre-release status
#[derive(Debug, Clone)]
pub struct ReleaseVersion(semver::Version);

impl ReleaseVersion {
  pub fn new(version: semver::Version) -> Self {
    Self(version)
  }

  /// Parse from a semver string
  pub fn parse(text: &str) -> Result<Self, semver::Error> {
    semver::Version::parse(text).map(Self)
  }

  /// Name of the git tag marking this release
  pub fn tag_name(&self) -> String {
    self.0.to_string()
  }

  /// Annotated tag message for this release
  pub fn tag_message(&self) -> String {
    format!("Release version [{}].", self.0)
  }

  /// True for pre-release versions (`1.0.0-alpha.1`, `0.3.0-SNAPSHOT`)
  pub fn is_integration(&self) -> bool {
    !self.0.pre.is_empty()
  }
}

/// Versions are equal when they produce the same tag
impl PartialEq for ReleaseVersion {
  fn eq(&self, other: &Self) -> bool {
    self.tag_name() == other.tag_name()
  }
}

impl Eq for ReleaseVersion {}

impl fmt::Display for ReleaseVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<semver::Version> for ReleaseVersion {
  fn from(version: semver::Version) -> Self {
    Self(version)
  }
}

impl Serialize for ReleaseVersion {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&self.0)
  }
}
