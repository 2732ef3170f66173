//! Project facts - build once, hand to the release engine
//!
//! # Design
//!
//! The engine never reads Cargo.toml, gate.toml or the lockfile itself. Each
//! command builds a [`Project`] once from cargo metadata and gate.toml, and
//! every stage reads from that immutable snapshot. Repository state is not part
//! of it: stages query git fresh every time. A pull that moves HEAD makes the
//! snapshot stale, which the sync check refuses.
//!
//! ```text
//! commands/check.rs, release.rs:
//!   GateConfig::load() -> verify_root() -> Project::from_config()
//!   |
//!   v
//!   ReleaseEngine::new(&project, &git, &transport, &reporter)
//! ```

use crate::cargo::metadata::ProjectMetadata;
use crate::core::config::{GateConfig, PublishWorkflow, ReleaseSettings};
use crate::core::error::GateResult;
use crate::graph::ArtifactGraph;
use crate::release::version::ReleaseVersion;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A named artifact slated for upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publication {
  pub name: String,
  /// Artifact file relative to the project root
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<PathBuf>,
}

impl Publication {
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      path: None,
    }
  }
}

/// Where a plugin dependency was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginSource {
  /// `[build-dependencies]` of the released package
  BuildDependency,
  /// `[[plugins]]` in gate.toml
  Declared,
}

/// A build-time plugin with its resolved version
#[derive(Debug, Clone, Serialize)]
pub struct PluginDependency {
  pub name: String,
  pub version: ReleaseVersion,
  pub source: PluginSource,
}

impl PluginDependency {
  pub fn new(name: impl Into<String>, version: ReleaseVersion, source: PluginSource) -> Self {
    Self {
      name: name.into(),
      version,
      source,
    }
  }

  /// `name@version`
  pub fn coordinate(&self) -> String {
    format!("{}@{}", self.name, self.version)
  }
}

/// The release subject: everything the engine needs to know about the project
#[derive(Debug, Clone)]
pub struct Project {
  /// Project root (where `.git` is expected)
  pub root: PathBuf,

  /// Package being released
  pub name: String,

  /// Declared version; also the tag name
  pub version: ReleaseVersion,

  /// Publish workflow, absent when gate.toml has no `[publish]`
  pub publish: Option<PublishWorkflow>,

  pub publications: Vec<Publication>,

  pub plugins: Vec<PluginDependency>,

  /// Resolved dependency graph; None when the package has no dependencies
  pub graph: Option<ArtifactGraph>,

  pub settings: ReleaseSettings,
}

impl Project {
  /// Minimal project with no workflow, publications, plugins or graph
  pub fn new(root: impl Into<PathBuf>, name: impl Into<String>, version: ReleaseVersion) -> Self {
    Self {
      root: root.into(),
      name: name.into(),
      version,
      publish: None,
      publications: Vec::new(),
      plugins: Vec::new(),
      graph: None,
      settings: ReleaseSettings::default(),
    }
  }

  /// Load project facts from `root`: gate.toml plus cargo metadata
  pub fn load(root: &Path) -> GateResult<Self> {
    Self::from_config(root, GateConfig::load(root)?)
  }

  /// Combine an already-loaded gate.toml with cargo metadata.
  ///
  /// When gate.toml declares no publications, the released package itself is
  /// the single publication.
  pub fn from_config(root: &Path, config: GateConfig) -> GateResult<Self> {
    let metadata = ProjectMetadata::load(root)?;
    let package = metadata.release_package(config.release.package.as_deref())?;

    let mut project = Self::new(root, package.name.to_string(), ReleaseVersion::new(package.version.clone()));

    project.plugins = metadata
      .build_dependencies(package)
      .into_iter()
      .map(|dep| PluginDependency::new(dep.name, ReleaseVersion::new(dep.version), PluginSource::BuildDependency))
      .collect();
    for declared in &config.plugins {
      project.plugins.push(PluginDependency::new(
        declared.name.clone(),
        ReleaseVersion::parse(&declared.version)?,
        PluginSource::Declared,
      ));
    }

    project.publications = if config.publications.is_empty() {
      vec![Publication::named(project.name.clone())]
    } else {
      config
        .publications
        .iter()
        .map(|p| Publication {
          name: p.name.clone(),
          path: p.path.clone(),
        })
        .collect()
    };

    project.graph = metadata.artifact_graph(package);
    project.publish = config.publish;
    project.settings = config.release;

    Ok(project)
  }

  /// Project root as Path reference (convenience)
  pub fn root(&self) -> &Path {
    &self.root
  }
}
