//! Error types for cargo-gate with contextual messages and exit codes
//!
//! Every release stage fails with one of a small set of error kinds. Each kind
//! maps to an exit code and carries a help message that tells the user what to
//! fix before trying again.

use crate::release::state::ReleaseState;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for cargo-gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (git, network, I/O, publish transport)
  System = 2,
  /// Release refused (dirty tree, duplicate tag, pre-release dependency)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for cargo-gate
#[derive(Debug)]
pub enum GateError {
  /// Project setup problems (no repository, no publish workflow, bad gate.toml)
  Config(ConfigError),

  /// A version-control command failed or could not be run
  Vcs(VcsError),

  /// Working copy is not in a releasable state
  DirtyState(DirtyState),

  /// The version is already tagged
  DuplicateRelease { version: String },

  /// A dependency resolves to a pre-release version
  UnreleasableDependency {
    kind: DependencyKind,
    coordinate: String,
  },

  /// One or more publications failed after the tag was written
  Publish {
    tag: String,
    failures: Vec<PublishFailure>,
    rollback: TagRollback,
  },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl GateError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    GateError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    GateError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      GateError::Message { message, context, help } => GateError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      GateError::Io(err) => GateError::Message {
        message: format!("{}: {}", ctx_str, err),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      GateError::Config(_) => ExitCode::User,
      GateError::Vcs(_) => ExitCode::System,
      GateError::DirtyState(_) => ExitCode::Validation,
      GateError::DuplicateRelease { .. } => ExitCode::Validation,
      GateError::UnreleasableDependency { .. } => ExitCode::Validation,
      GateError::Publish { .. } => ExitCode::System,
      GateError::Io(_) => ExitCode::System,
      GateError::Message { .. } => ExitCode::User,
    }
  }

  /// Short machine-readable name of the error kind (used in JSON reports)
  pub fn kind(&self) -> &'static str {
    match self {
      GateError::Config(_) => "configuration",
      GateError::Vcs(_) => "vcs-operation",
      GateError::DirtyState(_) => "dirty-state",
      GateError::DuplicateRelease { .. } => "duplicate-release",
      GateError::UnreleasableDependency { .. } => "unreleasable-dependency",
      GateError::Publish { .. } => "publish",
      GateError::Io(_) => "io",
      GateError::Message { .. } => "error",
    }
  }

  /// Furthest release state recorded in git when this error ended the run
  ///
  /// Only publish failures happen after the tag is written; every other error
  /// leaves the repository untagged.
  pub fn reached_state(&self) -> Option<ReleaseState> {
    match self {
      GateError::Publish {
        rollback: TagRollback::Removed,
        ..
      } => None,
      GateError::Publish { .. } => Some(ReleaseState::Tagged),
      _ => None,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      GateError::Config(e) => e.help_message(),
      GateError::Vcs(e) => e.help_message(),
      GateError::DirtyState(e) => Some(e.help_message()),
      GateError::DuplicateRelease { .. } => {
        Some("Bump the package version in Cargo.toml before releasing again.".to_string())
      }
      GateError::UnreleasableDependency { kind, .. } => Some(match kind {
        DependencyKind::Plugin => "Pin the plugin to a released version before cutting a release.".to_string(),
        DependencyKind::Artifact => {
          "Release the dependency first, then depend on its released version.".to_string()
        }
      }),
      GateError::Publish { tag, rollback, .. } => Some(match rollback {
        TagRollback::NotAttempted => format!(
          "Tag '{}' already exists locally. Fix the transport problem and republish, or remove the tag with `git tag -d {}`.",
          tag, tag
        ),
        TagRollback::Removed => "The release tag was removed; rerun the release once publishing works.".to_string(),
        TagRollback::Failed(_) => format!("Remove the tag manually with `git tag -d {}` before retrying.", tag),
      }),
      GateError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for GateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GateError::Config(e) => write!(f, "{}", e),
      GateError::Vcs(e) => write!(f, "{}", e),
      GateError::DirtyState(e) => write!(f, "{}", e),
      GateError::DuplicateRelease { version } => {
        write!(f, "Version {} already released: tag '{}' exists", version, version)
      }
      GateError::UnreleasableDependency { kind, coordinate } => {
        write!(f, "Cannot release with integration {} dependency: {}", kind, coordinate)
      }
      GateError::Publish { tag, failures, rollback } => {
        write!(f, "Publishing failed for {} publication(s) after tagging {}", failures.len(), tag)?;
        for failure in failures {
          write!(f, "\n  - {}: {}", failure.publication, failure.reason)?;
        }
        match rollback {
          TagRollback::NotAttempted => Ok(()),
          TagRollback::Removed => write!(f, "\nTag '{}' was rolled back", tag),
          TagRollback::Failed(reason) => write!(f, "\nTag rollback failed: {}", reason),
        }
      }
      GateError::Io(e) => write!(f, "I/O error: {}", e),
      GateError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for GateError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      GateError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for GateError {
  fn from(err: io::Error) -> Self {
    GateError::Io(err)
  }
}

impl From<toml_edit::de::Error> for GateError {
  fn from(err: toml_edit::de::Error) -> Self {
    GateError::Config(ConfigError::Invalid {
      message: format!("TOML deserialization error: {}", err),
    })
  }
}

impl From<serde_json::Error> for GateError {
  fn from(err: serde_json::Error) -> Self {
    GateError::message(format!("JSON error: {}", err))
  }
}

impl From<semver::Error> for GateError {
  fn from(err: semver::Error) -> Self {
    GateError::Config(ConfigError::Invalid {
      message: format!("Invalid version: {}", err),
    })
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Project root has no git metadata directory
  NotARepository { path: PathBuf },

  /// No `[publish]` section in gate.toml
  MissingPublishWorkflow,

  /// Missing required field
  MissingField { field: String },

  /// Package selection did not match the manifest
  PackageNotFound { name: String },

  /// `cargo metadata` could not read the project manifest
  ManifestUnreadable { path: PathBuf, reason: String },

  /// gate.toml failed to parse or validate
  Invalid { message: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotARepository { path } => Some(format!(
        "Run `git init` in {} (or run cargo-gate from the repository root).",
        path.display()
      )),
      ConfigError::MissingPublishWorkflow => {
        Some("Add a [publish] section to gate.toml, e.g.\n  [publish]\n  kind = \"cargo\"".to_string())
      }
      ConfigError::PackageNotFound { .. } => {
        Some("Set `release.package` in gate.toml to one of the workspace members.".to_string())
      }
      ConfigError::ManifestUnreadable { .. } => {
        Some("Run cargo-gate from the directory holding the project's Cargo.toml.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotARepository { path } => {
        write!(f, "{} is not a git repository - releases require one", path.display())
      }
      ConfigError::MissingPublishWorkflow => write!(f, "No publish workflow configured"),
      ConfigError::MissingField { field } => write!(f, "Missing required field in config: {}", field),
      ConfigError::PackageNotFound { name } => write!(f, "Package '{}' not found in workspace", name),
      ConfigError::ManifestUnreadable { path, reason } => {
        write!(f, "Cannot read Cargo manifest {}\n{}", path.display(), reason.trim_end())
      }
      ConfigError::Invalid { message } => write!(f, "Invalid configuration: {}", message),
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum VcsError {
  /// Git command exited non-zero
  CommandFailed { command: String, output: String },

  /// Git command did not finish in time and was killed
  Timeout { command: String, secs: u64 },

  /// Git command could not be started
  Spawn { command: String, reason: String },
}

impl VcsError {
  fn help_message(&self) -> Option<String> {
    match self {
      VcsError::CommandFailed { output, .. } => {
        let lower = output.to_lowercase();
        if lower.contains("no tracking information") {
          Some("Set an upstream for the current branch: git branch --set-upstream-to=origin/<branch>".to_string())
        } else if lower.contains("permission denied") || lower.contains("could not read from remote") {
          Some("Check your SSH key and access to the remote repository.".to_string())
        } else {
          None
        }
      }
      VcsError::Timeout { .. } => {
        Some("Raise `release.command_timeout_secs` in gate.toml if the remote is slow.".to_string())
      }
      VcsError::Spawn { .. } => Some("Make sure `git` is installed and on PATH.".to_string()),
    }
  }
}

impl fmt::Display for VcsError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VcsError::CommandFailed { command, output } => {
        write!(f, "Git command failed: {}\n{}", command, output.trim_end())
      }
      VcsError::Timeout { command, secs } => {
        write!(f, "Git command timed out after {}s: {}", secs, command)
      }
      VcsError::Spawn { command, reason } => {
        write!(f, "Failed to run {}: {}", command, reason)
      }
    }
  }
}

/// Reasons the working copy cannot be released
#[derive(Debug)]
pub enum DirtyState {
  /// Local branch is ahead of its upstream
  UnpushedCommits { status: String },

  /// Tracked or untracked modifications present
  UncommittedChanges { status: String },

  /// `git pull` moved HEAD after the project facts were read
  UpdatedByPull { before: String, after: String },
}

impl DirtyState {
  fn help_message(&self) -> String {
    match self {
      DirtyState::UnpushedCommits { .. } => "Push your local commits before releasing: git push".to_string(),
      DirtyState::UncommittedChanges { .. } => "Commit or stash your changes before releasing.".to_string(),
      DirtyState::UpdatedByPull { .. } => {
        "Run the release again so the pulled version and dependencies are checked.".to_string()
      }
    }
  }
}

impl fmt::Display for DirtyState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DirtyState::UnpushedCommits { status } => {
        write!(f, "Local commits not pushed\n{}", status.trim_end())
      }
      DirtyState::UncommittedChanges { status } => {
        write!(f, "Uncommitted modifications present\n{}", status.trim_end())
      }
      DirtyState::UpdatedByPull { before, after } => {
        write!(f, "Pull brought in new commits ({}..{}); the project was read before them", before, after)
      }
    }
  }
}

/// Which dependency universe an offending dependency came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
  /// Build-time plugin (build-dependency or declared plugin)
  Plugin,
  /// Node in the artifact dependency graph
  Artifact,
}

impl fmt::Display for DependencyKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DependencyKind::Plugin => write!(f, "plugin"),
      DependencyKind::Artifact => write!(f, "artifact"),
    }
  }
}

/// A single publication that the transport refused
#[derive(Debug, Clone)]
pub struct PublishFailure {
  pub publication: String,
  pub reason: String,
}

/// Outcome of the optional tag compensation after a publish failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagRollback {
  NotAttempted,
  Removed,
  Failed(String),
}

/// Result type alias for cargo-gate
pub type GateResult<T> = Result<T, GateError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<GateError>,
{
  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &GateError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
