//! Publication transport
//!
//! [`WorkflowTransport`] uploads one publication according to the configured
//! [`PublishWorkflow`]:
//!
//! - **cargo**: `cargo publish -p <name> [--registry <r>]` in the project root
//! - **directory**: copy the artifact into `<dir>/<name>/<version>/` next to a
//!   `.sha256` sidecar; existing files are never overwritten
//! - **command**: run a user command with `{name}`, `{version}`, `{path}`
//!   substituted into its arguments

use crate::core::config::PublishWorkflow;
use crate::core::context::Publication;
use crate::core::error::{GateError, GateResult, ResultExt};
use crate::core::process::{self, RunError};
use crate::release::version::ReleaseVersion;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// Uploads a single publication. Implementations must be shareable across the
/// publisher's worker threads.
pub trait PublishTransport: Send + Sync {
  fn publish(&self, publication: &Publication, version: &ReleaseVersion, workflow: &PublishWorkflow) -> GateResult<()>;
}

/// Default transport: dispatches on the workflow kind
pub struct WorkflowTransport {
  root: PathBuf,
  timeout: Option<Duration>,
}

impl WorkflowTransport {
  pub fn new(root: &Path, timeout: Option<Duration>) -> Self {
    Self {
      root: root.to_path_buf(),
      timeout,
    }
  }

  fn cargo_publish(&self, publication: &Publication, registry: Option<&str>) -> GateResult<()> {
    let mut args = vec!["publish".to_string(), "-p".to_string(), publication.name.clone()];
    if let Some(registry) = registry {
      args.push("--registry".to_string());
      args.push(registry.to_string());
    }
    self.run("cargo", &args)
  }

  fn copy_to_directory(&self, publication: &Publication, version: &ReleaseVersion, dir: &Path) -> GateResult<()> {
    let relative = publication.path.as_ref().ok_or_else(|| {
      GateError::message(format!(
        "Publication '{}' has no path; the directory workflow needs a file to copy",
        publication.name
      ))
    })?;
    let source = self.root.join(relative);
    let file_name = source
      .file_name()
      .ok_or_else(|| GateError::message(format!("Publication path {} has no file name", source.display())))?;

    let target_dir = self.root.join(dir).join(&publication.name).join(version.tag_name());
    let target = target_dir.join(file_name);
    if target.exists() {
      return Err(GateError::message(format!(
        "{} already exists in the repository; published artifacts are immutable",
        target.display()
      )));
    }

    let bytes = fs::read(&source).with_context(|| format!("Failed to read artifact {}", source.display()))?;
    fs::create_dir_all(&target_dir).with_context(|| format!("Failed to create {}", target_dir.display()))?;
    fs::write(&target, &bytes).with_context(|| format!("Failed to write {}", target.display()))?;

    let digest = format!("{:x}", Sha256::digest(&bytes));
    let mut sidecar = target.clone().into_os_string();
    sidecar.push(".sha256");
    fs::write(&sidecar, format!("{}  {}\n", digest, file_name.to_string_lossy()))
      .with_context(|| format!("Failed to write checksum for {}", target.display()))?;

    Ok(())
  }

  fn run_command(
    &self,
    publication: &Publication,
    version: &ReleaseVersion,
    program: &str,
    args: &[String],
  ) -> GateResult<()> {
    let path = publication
      .path
      .as_ref()
      .map(|p| self.root.join(p).to_string_lossy().into_owned())
      .unwrap_or_default();
    let version = version.tag_name();

    let args: Vec<String> = args
      .iter()
      .map(|arg| {
        arg
          .replace("{name}", &publication.name)
          .replace("{version}", &version)
          .replace("{path}", &path)
      })
      .collect();

    self.run(program, &args)
  }

  fn run(&self, program: &str, args: &[String]) -> GateResult<()> {
    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(&self.root);

    let command = process::describe(program, args);
    let result = process::run_captured(cmd, self.timeout).map_err(|err| match err {
      RunError::Spawn(e) => GateError::message(format!("Failed to run {}: {}", command, e)),
      RunError::TimedOut(limit) => GateError::message(format!("{} timed out after {}s", command, limit.as_secs())),
    })?;

    if !result.success() {
      return Err(GateError::message(format!(
        "{} exited with status {}\n{}",
        command,
        result.exit_code,
        result.output.trim_end()
      )));
    }

    Ok(())
  }
}

impl PublishTransport for WorkflowTransport {
  fn publish(&self, publication: &Publication, version: &ReleaseVersion, workflow: &PublishWorkflow) -> GateResult<()> {
    match workflow {
      PublishWorkflow::Cargo { registry } => self.cargo_publish(publication, registry.as_deref()),
      PublishWorkflow::Directory { path } => self.copy_to_directory(publication, version, path),
      PublishWorkflow::Command { program, args } => self.run_command(publication, version, program, args),
    }
  }
}
