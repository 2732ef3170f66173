use crate::core::error::{ConfigError, GateError, GateResult};
use crate::graph::ArtifactGraph;
use cargo_metadata::{DependencyKind, Metadata, MetadataCommand, Package};
use std::path::Path;

/// Project introspection using cargo_metadata
pub struct ProjectMetadata {
  metadata: Metadata,
}

/// A build-dependency of the released package with its resolved version
#[derive(Debug, Clone)]
pub struct ResolvedBuildDependency {
  pub name: String,
  pub version: semver::Version,
}

impl ProjectMetadata {
  pub fn load(project_root: &Path) -> GateResult<Self> {
    let manifest = project_root.join("Cargo.toml");
    let metadata = MetadataCommand::new()
      .manifest_path(&manifest)
      .exec()
      .map_err(|e| {
        GateError::Config(ConfigError::ManifestUnreadable {
          path: manifest.clone(),
          reason: e.to_string(),
        })
      })?;
    Ok(Self { metadata })
  }

  /// Package to release: the named workspace member, or the root package
  pub fn release_package(&self, name: Option<&str>) -> GateResult<&Package> {
    match name {
      Some(name) => self
        .metadata
        .workspace_packages()
        .into_iter()
        .find(|pkg| pkg.name == name)
        .ok_or_else(|| {
          GateError::Config(ConfigError::PackageNotFound {
            name: name.to_string(),
          })
        }),
      None => self.metadata.root_package().ok_or_else(|| {
        GateError::with_help(
          "No root package: the manifest is a virtual workspace",
          "Set `release.package` in gate.toml to the member you want to release.",
        )
      }),
    }
  }

  /// Direct build-dependencies of `package`, with the versions cargo resolved
  pub fn build_dependencies(&self, package: &Package) -> Vec<ResolvedBuildDependency> {
    let Some(resolve) = self.metadata.resolve.as_ref() else {
      return Vec::new();
    };
    let Some(node) = resolve.nodes.iter().find(|n| n.id == package.id) else {
      return Vec::new();
    };

    let mut deps: Vec<ResolvedBuildDependency> = node
      .deps
      .iter()
      .filter(|dep| dep.dep_kinds.iter().any(|k| k.kind == DependencyKind::Build))
      .filter_map(|dep| self.metadata.packages.iter().find(|p| p.id == dep.pkg))
      .map(|pkg| ResolvedBuildDependency {
        name: pkg.name.to_string(),
        version: pkg.version.clone(),
      })
      .collect();

    deps.sort_by(|a, b| a.name.cmp(&b.name));
    deps
  }

  /// Resolved dependency graph rooted at `package` (None when it has no dependencies)
  pub fn artifact_graph(&self, package: &Package) -> Option<ArtifactGraph> {
    ArtifactGraph::from_metadata(&self.metadata, &package.id)
  }
}
