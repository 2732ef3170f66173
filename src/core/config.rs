use crate::core::error::{ConfigError, GateError, GateResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for cargo-gate
/// Searched in order: gate.toml, .gate.toml, .cargo/gate.toml, .config/gate.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
  #[serde(default)]
  pub release: ReleaseSettings,
  /// Where and how publications are uploaded. Releases refuse to start without it.
  #[serde(default)]
  pub publish: Option<PublishWorkflow>,
  #[serde(default)]
  pub publications: Vec<PublicationConfig>,
  #[serde(default)]
  pub plugins: Vec<PluginConfig>,
}

/// `[release]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseSettings {
  /// Package to release in a multi-package workspace (default: root package)
  #[serde(default)]
  pub package: Option<String>,

  /// Remote that tags are fetched from (default: "origin")
  #[serde(default = "default_remote")]
  pub remote: String,

  /// Timeout for each git/publish subprocess, in seconds. 0 disables the timeout.
  #[serde(default = "default_command_timeout_secs")]
  pub command_timeout_secs: u64,

  /// Follow optional dependency edges when scanning the artifact graph
  #[serde(default = "default_true")]
  pub include_optional: bool,

  /// Publish all publications concurrently
  #[serde(default = "default_true")]
  pub parallel_publish: bool,

  /// Delete the local release tag when publishing fails
  #[serde(default)]
  pub rollback_tag_on_publish_failure: bool,
}

fn default_remote() -> String {
  "origin".to_string()
}

fn default_command_timeout_secs() -> u64 {
  300
}

fn default_true() -> bool {
  true
}

impl Default for ReleaseSettings {
  fn default() -> Self {
    Self {
      package: None,
      remote: default_remote(),
      command_timeout_secs: default_command_timeout_secs(),
      include_optional: true,
      parallel_publish: true,
      rollback_tag_on_publish_failure: false,
    }
  }
}

impl ReleaseSettings {
  /// Subprocess timeout, or None when disabled
  pub fn command_timeout(&self) -> Option<Duration> {
    if self.command_timeout_secs == 0 {
      None
    } else {
      Some(Duration::from_secs(self.command_timeout_secs))
    }
  }
}

/// `[publish]` table: the publish workflow
///
/// ```toml
/// [publish]
/// kind = "cargo"
/// registry = "my-registry"   # optional
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PublishWorkflow {
  /// `cargo publish -p <name>` against crates.io or a named registry
  Cargo {
    #[serde(default)]
    registry: Option<String>,
  },
  /// Copy the publication file into `<path>/<name>/<version>/` with a .sha256 sidecar
  Directory { path: PathBuf },
  /// Arbitrary command; `{name}`, `{version}` and `{path}` in args are substituted
  Command {
    program: String,
    #[serde(default)]
    args: Vec<String>,
  },
}

impl PublishWorkflow {
  /// Short description for plans and reports
  pub fn describe(&self) -> String {
    match self {
      PublishWorkflow::Cargo { registry: Some(r) } => format!("cargo publish (registry: {})", r),
      PublishWorkflow::Cargo { registry: None } => "cargo publish (crates.io)".to_string(),
      PublishWorkflow::Directory { path } => format!("directory {}", path.display()),
      PublishWorkflow::Command { program, .. } => format!("command `{}`", program),
    }
  }

  /// Validate workflow fields
  pub fn validate(&self) -> GateResult<()> {
    match self {
      PublishWorkflow::Directory { path } if path.as_os_str().is_empty() => {
        Err(GateError::Config(ConfigError::MissingField {
          field: "publish.path".to_string(),
        }))
      }
      PublishWorkflow::Command { program, .. } if program.trim().is_empty() => {
        Err(GateError::Config(ConfigError::MissingField {
          field: "publish.program".to_string(),
        }))
      }
      _ => Ok(()),
    }
  }
}

/// `[[publications]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationConfig {
  pub name: String,
  /// Artifact file, relative to the project root (required by the directory workflow)
  #[serde(default)]
  pub path: Option<PathBuf>,
}

/// `[[plugins]]` entry: a build-time tool pinned outside Cargo.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
  pub name: String,
  pub version: String,
}

impl GateConfig {
  /// Find config file in search order: gate.toml, .gate.toml, .cargo/gate.toml, .config/gate.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("gate.toml"),
      path.join(".gate.toml"),
      path.join(".cargo").join("gate.toml"),
      path.join(".config").join("gate.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, falling back to defaults (no publish workflow) when no file exists
  pub fn load(path: &Path) -> GateResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

    Self::parse(&content).with_context(|| format!("Invalid configuration in {}", config_path.display()))
  }

  /// Parse and validate config text
  pub fn parse(content: &str) -> GateResult<Self> {
    let config: GateConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Validate cross-field rules
  pub fn validate(&self) -> GateResult<()> {
    if let Some(workflow) = &self.publish {
      workflow.validate()?;

      if matches!(workflow, PublishWorkflow::Directory { .. })
        && let Some(publication) = self.publications.iter().find(|p| p.path.is_none())
      {
        return Err(GateError::Config(ConfigError::MissingField {
          field: format!("path for publication '{}' (required by the directory workflow)", publication.name),
        }));
      }
    }

    for (idx, publication) in self.publications.iter().enumerate() {
      if publication.name.trim().is_empty() {
        return Err(GateError::Config(ConfigError::MissingField {
          field: format!("publications[{}].name", idx),
        }));
      }
    }

    for plugin in &self.plugins {
      semver::Version::parse(&plugin.version)
        .map_err(|e| GateError::with_help(
          format!("Invalid version '{}' for plugin '{}': {}", plugin.version, plugin.name, e),
          "Plugin versions must be full semver versions, e.g. \"1.4.0\"",
        ))?;
    }

    Ok(())
  }
}
