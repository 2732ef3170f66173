//! Release engine
//!
//! Drives a release through its state machine:
//!
//! ```text
//! Start → GuardOk → SyncedClean → TagAvailable → NoIntegrationDeps → Tagged → Published
//! ```
//!
//! Stages run strictly in order and the first failure ends the run. The tag
//! writer and publisher only run once every check has passed.

use crate::checks::{CheckContext, release_checks};
use crate::core::config::PublishWorkflow;
use crate::core::context::Project;
use crate::core::error::{ConfigError, GateError, GateResult, TagRollback};
use crate::core::vcs::VcsClient;
use crate::release::publish;
use crate::release::report::ReleaseReport;
use crate::release::state::ReleaseState;
use crate::release::tagging;
use crate::release::transport::PublishTransport;
use crate::ui::Reporter;
use chrono::Utc;

pub struct ReleaseEngine<'a> {
  project: &'a Project,
  vcs: &'a dyn VcsClient,
  transport: &'a dyn PublishTransport,
  reporter: &'a dyn Reporter,
}

impl<'a> ReleaseEngine<'a> {
  pub fn new(
    project: &'a Project,
    vcs: &'a dyn VcsClient,
    transport: &'a dyn PublishTransport,
    reporter: &'a dyn Reporter,
  ) -> Self {
    Self {
      project,
      vcs,
      transport,
      reporter,
    }
  }

  /// Run every read/verify stage. Nothing is tagged or published.
  pub fn preflight(&self) -> GateResult<ReleaseReport> {
    let started_at = Utc::now();
    let (state, checks) = self.run_checks()?;

    Ok(ReleaseReport {
      package: self.project.name.clone(),
      version: self.project.version.clone(),
      tag: None,
      state,
      checks,
      published: Vec::new(),
      started_at,
      finished_at: Utc::now(),
    })
  }

  /// Full guarded release: checks, tag, publish
  pub fn release(&self) -> GateResult<ReleaseReport> {
    let started_at = Utc::now();
    let (_, checks) = self.run_checks()?;

    let workflow = self.workflow()?;

    self.reporter.info(&format!("Tagging release {}", self.project.version));
    let tag = tagging::write_tag(self.project, self.vcs)?;
    self.reporter.success(&format!("Created tag {}", tag));

    self.reporter.info(&format!(
      "Publishing {} publication(s) via {}",
      self.project.publications.len(),
      workflow.describe()
    ));
    let outcome = publish::publish_all(self.project, workflow, self.transport, self.reporter);

    if !outcome.is_success() {
      let rollback = self.rollback(&tag);
      return Err(GateError::Publish {
        tag,
        failures: outcome.failures,
        rollback,
      });
    }

    Ok(ReleaseReport {
      package: self.project.name.clone(),
      version: self.project.version.clone(),
      tag: Some(tag),
      state: ReleaseState::Published,
      checks,
      published: outcome.published,
      started_at,
      finished_at: Utc::now(),
    })
  }

  fn run_checks(&self) -> GateResult<(ReleaseState, Vec<&'static str>)> {
    let ctx = CheckContext {
      project: self.project,
      vcs: self.vcs,
    };

    let mut state = ReleaseState::Start;
    let mut passed = Vec::new();
    for check in release_checks() {
      self.reporter.info(check.description());
      check.run(&ctx)?;
      state = check.reaches();
      passed.push(check.name());
    }
    self.reporter.success(&format!("All checks passed for {} {}", self.project.name, self.project.version));

    Ok((state, passed))
  }

  /// The repository guard has already verified the workflow is present
  fn workflow(&self) -> GateResult<&'a PublishWorkflow> {
    self
      .project
      .publish
      .as_ref()
      .ok_or(GateError::Config(ConfigError::MissingPublishWorkflow))
  }

  fn rollback(&self, tag: &str) -> TagRollback {
    if !self.project.settings.rollback_tag_on_publish_failure {
      self
        .reporter
        .warn(&format!("Tag {} stays in place; the release is recorded in git", tag));
      return TagRollback::NotAttempted;
    }

    match tagging::remove_tag(self.vcs, tag) {
      Ok(()) => {
        self.reporter.warn(&format!("Removed tag {} after publish failure", tag));
        TagRollback::Removed
      }
      Err(err) => TagRollback::Failed(err.to_string()),
    }
  }
}
