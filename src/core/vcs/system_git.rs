//! System git backend
//!
//! Each operation is one git subprocess in an isolated environment, bounded by
//! the configured command timeout. Nothing is cached: the release run mutates
//! the repository (pull, tag), so every stage reads fresh state.

use super::{StatusFormat, VcsClient};
use crate::core::error::{GateError, GateResult, VcsError};
use crate::core::process::{self, CommandResult, RunError};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// Environment variables passed through to git
const PASSTHROUGH_ENV: &[&str] = &[
  "PATH",
  "HOME",
  "XDG_CONFIG_HOME",
  "SSH_AUTH_SOCK",
  "GIT_SSH",
  "GIT_SSH_COMMAND",
  "GIT_ASKPASS",
];

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,

  /// Remote that tags are fetched from
  remote: String,

  /// Per-command timeout (None = wait forever)
  timeout: Option<Duration>,
}

impl SystemGit {
  /// Create a backend for the repository at `path`.
  ///
  /// No subprocess is spawned here; the repository guard decides whether
  /// `path` is a repository before any command runs.
  pub fn new(path: &Path, remote: impl Into<String>, timeout: Option<Duration>) -> Self {
    Self {
      repo_path: path.to_path_buf(),
      remote: remote.into(),
      timeout,
    }
  }

  /// Run `git <args>` and capture its result
  fn run(&self, args: &[&str]) -> GateResult<CommandResult> {
    let mut cmd = self.git_cmd();
    cmd.args(args);

    let owned: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let command = process::describe("git", &owned);

    process::run_captured(cmd, self.timeout).map_err(|err| match err {
      RunError::Spawn(e) => GateError::Vcs(VcsError::Spawn {
        command,
        reason: e.to_string(),
      }),
      RunError::TimedOut(limit) => GateError::Vcs(VcsError::Timeout {
        command,
        secs: limit.as_secs(),
      }),
    })
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables, then whitelists [`PASSTHROUGH_ENV`]
  /// - Forces the C locale so status markers ("ahead") are not translated
  /// - Never prompts for credentials on a terminal
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    cmd.env_clear();
    for key in PASSTHROUGH_ENV {
      if let Ok(value) = std::env::var(key) {
        cmd.env(key, value);
      }
    }
    cmd.env("LC_ALL", "C");
    cmd.env("GIT_TERMINAL_PROMPT", "0");

    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }
}

impl VcsClient for SystemGit {
  fn head(&self) -> GateResult<CommandResult> {
    self.run(&["rev-parse", "HEAD"])
  }

  fn pull(&self) -> GateResult<CommandResult> {
    self.run(&["pull", "--ff-only"])
  }

  fn fetch_tags(&self) -> GateResult<CommandResult> {
    self.run(&["fetch", &self.remote, "--tags"])
  }

  fn status(&self, format: StatusFormat) -> GateResult<CommandResult> {
    match format {
      StatusFormat::Short => self.run(&["status", "--short", "--branch"]),
      StatusFormat::Porcelain => self.run(&["status", "--porcelain"]),
    }
  }

  fn tag(&self, name: &str, message: &str) -> GateResult<CommandResult> {
    self.run(&["tag", "-a", name, "-m", message])
  }

  fn tag_exists(&self, name: &str) -> GateResult<bool> {
    let reference = format!("refs/tags/{}", name);
    let result = self.run(&["rev-parse", "--quiet", "--verify", &reference])?;
    Ok(result.success())
  }

  fn delete_tag(&self, name: &str) -> GateResult<CommandResult> {
    self.run(&["tag", "-d", name])
  }
}
