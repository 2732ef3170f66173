//! In-memory doubles shared by unit tests

use crate::core::config::PublishWorkflow;
use crate::core::context::{Project, Publication};
use crate::core::error::{GateError, GateResult};
use crate::core::vcs::{CommandResult, StatusFormat, VcsClient};
use crate::release::transport::PublishTransport;
use crate::release::version::ReleaseVersion;
use crate::ui::Reporter;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Mutex;

/// Scripted VCS: each command returns the configured result and is logged
pub struct FakeVcs {
  pub head: CommandResult,
  /// HEAD reported once `pull` has run (None = the pull changed nothing)
  pub head_after_pull: Option<CommandResult>,
  pub pull: CommandResult,
  pub short_status: CommandResult,
  pub porcelain: CommandResult,
  pub fetch: CommandResult,
  pub tag_result: CommandResult,
  pub delete_result: CommandResult,
  tags: Mutex<BTreeSet<String>>,
  created: Mutex<Vec<(String, String)>>,
  calls: Mutex<Vec<String>>,
}

impl FakeVcs {
  /// Synchronised, clean repository with no tags
  pub fn clean() -> Self {
    Self {
      head: CommandResult::new(0, "c0ffee00\n"),
      head_after_pull: None,
      pull: CommandResult::new(0, "Already up to date.\n"),
      short_status: CommandResult::new(0, "## main...origin/main\n"),
      porcelain: CommandResult::new(0, ""),
      fetch: CommandResult::new(0, ""),
      tag_result: CommandResult::new(0, ""),
      delete_result: CommandResult::new(0, ""),
      tags: Mutex::new(BTreeSet::new()),
      created: Mutex::new(Vec::new()),
      calls: Mutex::new(Vec::new()),
    }
  }

  pub fn with_tags(self, tags: &[&str]) -> Self {
    self.tags.lock().unwrap().extend(tags.iter().map(|t| t.to_string()));
    self
  }

  /// Commands run so far, in order
  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }

  /// `(name, message)` of every tag created
  pub fn created_tags(&self) -> Vec<(String, String)> {
    self.created.lock().unwrap().clone()
  }

  fn record(&self, call: impl Into<String>) {
    self.calls.lock().unwrap().push(call.into());
  }
}

impl VcsClient for FakeVcs {
  fn head(&self) -> GateResult<CommandResult> {
    let pulled = self.calls().iter().any(|c| c == "pull");
    self.record("rev-parse:head");
    match (&self.head_after_pull, pulled) {
      (Some(after), true) => Ok(after.clone()),
      _ => Ok(self.head.clone()),
    }
  }

  fn pull(&self) -> GateResult<CommandResult> {
    self.record("pull");
    Ok(self.pull.clone())
  }

  fn fetch_tags(&self) -> GateResult<CommandResult> {
    self.record("fetch-tags");
    Ok(self.fetch.clone())
  }

  fn status(&self, format: StatusFormat) -> GateResult<CommandResult> {
    match format {
      StatusFormat::Short => {
        self.record("status:short");
        Ok(self.short_status.clone())
      }
      StatusFormat::Porcelain => {
        self.record("status:porcelain");
        Ok(self.porcelain.clone())
      }
    }
  }

  fn tag(&self, name: &str, message: &str) -> GateResult<CommandResult> {
    self.record(format!("tag:{}", name));
    if self.tag_result.success() {
      self.tags.lock().unwrap().insert(name.to_string());
      self
        .created
        .lock()
        .unwrap()
        .push((name.to_string(), message.to_string()));
    }
    Ok(self.tag_result.clone())
  }

  fn tag_exists(&self, name: &str) -> GateResult<bool> {
    self.record(format!("tag-exists:{}", name));
    Ok(self.tags.lock().unwrap().contains(name))
  }

  fn delete_tag(&self, name: &str) -> GateResult<CommandResult> {
    self.record(format!("delete-tag:{}", name));
    if !self.delete_result.success() {
      return Ok(self.delete_result.clone());
    }
    if self.tags.lock().unwrap().remove(name) {
      Ok(self.delete_result.clone())
    } else {
      Ok(CommandResult::new(1, format!("error: tag '{}' not found.", name)))
    }
  }
}

/// Transport that records uploads and fails for the configured names
#[derive(Default)]
pub struct RecordingTransport {
  failing: Vec<String>,
  attempted: Mutex<Vec<String>>,
  published: Mutex<Vec<String>>,
}

impl RecordingTransport {
  pub fn failing(names: &[&str]) -> Self {
    Self {
      failing: names.iter().map(|n| n.to_string()).collect(),
      ..Self::default()
    }
  }

  pub fn attempted(&self) -> Vec<String> {
    self.attempted.lock().unwrap().clone()
  }

  pub fn published(&self) -> Vec<String> {
    self.published.lock().unwrap().clone()
  }
}

impl PublishTransport for RecordingTransport {
  fn publish(&self, publication: &Publication, _version: &ReleaseVersion, _workflow: &PublishWorkflow) -> GateResult<()> {
    self.attempted.lock().unwrap().push(publication.name.clone());
    if self.failing.contains(&publication.name) {
      return Err(GateError::message(format!("upload of {} rejected", publication.name)));
    }
    self.published.lock().unwrap().push(publication.name.clone());
    Ok(())
  }
}

/// Reporter that keeps every line
#[derive(Default)]
pub struct RecordingReporter {
  lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
  pub fn lines(&self) -> Vec<String> {
    self.lines.lock().unwrap().clone()
  }
}

impl Reporter for RecordingReporter {
  fn info(&self, msg: &str) {
    self.lines.lock().unwrap().push(format!("info: {}", msg));
  }

  fn success(&self, msg: &str) {
    self.lines.lock().unwrap().push(format!("success: {}", msg));
  }

  fn warn(&self, msg: &str) {
    self.lines.lock().unwrap().push(format!("warn: {}", msg));
  }
}

/// Releasable project rooted at a path that does not exist
pub fn project(version: &str) -> Project {
  project_at(Path::new("/nonexistent/demo"), version)
}

/// Releasable project (cargo workflow, one publication) rooted at `root`
pub fn project_at(root: &Path, version: &str) -> Project {
  let mut project = Project::new(root, "demo", ReleaseVersion::parse(version).unwrap());
  project.publish = Some(PublishWorkflow::Cargo { registry: None });
  project.publications = vec![Publication::named("demo")];
  project
}
