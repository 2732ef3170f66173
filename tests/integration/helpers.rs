//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Publish workflow written to gate.toml: copy the artifact into `dist/`
pub const DIRECTORY_WORKFLOW: &str = r#"
[publish]
kind = "directory"
path = "dist"

[[publications]]
name = "demo"
path = "artifacts/demo.crate"
"#;

/// A releasable package in a git clone of a bare remote
pub struct TestRepo {
  root: TempDir,
  /// Working copy (the project root)
  pub path: PathBuf,
  /// Bare repository acting as `origin`
  remote: PathBuf,
}

impl TestRepo {
  /// Package `demo` at `version`, committed and pushed, with the directory workflow
  pub fn new(version: &str) -> Result<Self> {
    Self::with_config(version, DIRECTORY_WORKFLOW)
  }

  /// Package `demo` at `version` with the given gate.toml contents
  pub fn with_config(version: &str, gate_toml: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let remote = root.path().join("remote.git");
    let path = root.path().join("work");
    std::fs::create_dir_all(&remote)?;
    std::fs::create_dir_all(&path)?;

    git(&remote, &["init", "--bare", "--initial-branch=main"])?;

    git(&path, &["init", "--initial-branch=main"])?;
    configure_identity(&path)?;
    git(&path, &["remote", "add", "origin", &remote.to_string_lossy()])?;

    let repo = Self { root, path, remote };

    repo.write_package("demo", version, "")?;
    repo.write(".gitignore", "/target\nCargo.lock\n")?;
    repo.write("artifacts/demo.crate", "demo crate contents\n")?;
    repo.write("gate.toml", gate_toml)?;

    repo.commit("Initial release candidate")?;
    git(&repo.path, &["push", "-u", "origin", "main"])?;

    Ok(repo)
  }

  /// Write `Cargo.toml` and `src/lib.rs` for a package in `dir` (relative, "" = root)
  pub fn write_package_in(&self, dir: &str, name: &str, version: &str, dependencies: &str) -> Result<()> {
    let prefix = if dir.is_empty() { String::new() } else { format!("{}/", dir) };
    self.write(&format!("{}Cargo.toml", prefix), &manifest(name, version, dependencies))?;
    self.write(&format!("{}src/lib.rs", prefix), "pub fn hello() -> &'static str {\n  \"hello\"\n}\n")?;
    Ok(())
  }

  /// Write the root package manifest
  pub fn write_package(&self, name: &str, version: &str, dependencies: &str) -> Result<()> {
    self.write_package_in("", name, version, dependencies)
  }

  /// Write a file relative to the working copy
  pub fn write(&self, relative: &str, content: &str) -> Result<()> {
    let target = self.path.join(relative);
    if let Some(parent) = target.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&target, content).with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(())
  }

  /// Commit everything
  pub fn commit(&self, message: &str) -> Result<()> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    Ok(())
  }

  /// Commit and push to origin
  pub fn commit_and_push(&self, message: &str) -> Result<()> {
    self.commit(message)?;
    git(&self.path, &["push", "origin", "main"])?;
    Ok(())
  }

  /// Local tag names
  pub fn tags(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["tag", "--list"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Annotation of a local tag
  pub fn tag_message(&self, tag: &str) -> Result<String> {
    let output = git(&self.path, &["tag", "-l", "--format=%(contents)", tag])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Tag `name` on origin only (a release cut from another clone)
  pub fn tag_on_remote(&self, name: &str) -> Result<()> {
    git(&self.path, &["tag", "-a", name, "-m", "released elsewhere"])?;
    git(&self.path, &["push", "origin", name])?;
    git(&self.path, &["tag", "-d", name])?;
    Ok(())
  }

  /// Bump the version from a second clone and push it, leaving this copy behind origin
  pub fn push_version_from_other_clone(&self, version: &str) -> Result<()> {
    let other = self.root.path().join("other");
    git(self.root.path(), &["clone", &self.remote.to_string_lossy(), "other"])?;
    configure_identity(&other)?;

    std::fs::write(other.join("Cargo.toml"), manifest("demo", version, ""))?;
    git(&other, &["commit", "-am", &format!("Bump to {}", version)])?;
    git(&other, &["push", "origin", "main"])?;
    Ok(())
  }

  /// Version line of the working copy's Cargo.toml
  pub fn manifest_version(&self) -> Result<String> {
    let manifest = std::fs::read_to_string(self.path.join("Cargo.toml"))?;
    manifest
      .lines()
      .find(|line| line.starts_with("version"))
      .map(String::from)
      .context("Cargo.toml has no version line")
  }

  pub fn file_exists(&self, relative: &str) -> bool {
    self.path.join(relative).exists()
  }
}

fn manifest(name: &str, version: &str, dependencies: &str) -> String {
  format!(
    r#"[package]
name = "{}"
version = "{}"
edition = "2021"

[dependencies]
{}
"#,
    name, version, dependencies
  )
}

fn configure_identity(repo: &Path) -> Result<()> {
  git(repo, &["config", "user.name", "Test User"])?;
  git(repo, &["config", "user.email", "test@example.com"])?;
  git(repo, &["config", "commit.gpgsign", "false"])?;
  git(repo, &["config", "tag.gpgsign", "false"])?;
  Ok(())
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Finished cargo-gate invocation
pub struct GateRun {
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl GateRun {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Run cargo-gate CLI command; failures are returned, not raised
pub fn run_cargo_gate(cwd: &Path, args: &[&str]) -> Result<GateRun> {
  let cargo_gate_bin = env!("CARGO_BIN_EXE_cargo-gate");

  let output = Command::new(cargo_gate_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run cargo-gate")?;

  Ok(GateRun {
    code: output.status.code(),
    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
  })
}
