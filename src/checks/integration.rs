//! Integration-version check
//!
//! Two dependency universes must be free of pre-release versions:
//! - plugins (direct build-time dependencies), checked in declaration order
//! - the artifact graph, walked from its root over every reachable edge
//!
//! Both are fail-fast: the first offender is reported.

use super::trait_def::{CheckContext, ReleaseCheck};
use crate::core::context::Project;
use crate::core::error::{DependencyKind, GateError, GateResult};
use crate::graph::{Traversal, Visit};
use crate::release::state::ReleaseState;

pub struct IntegrationVersions;

impl ReleaseCheck for IntegrationVersions {
  fn name(&self) -> &'static str {
    "no-integration-deps"
  }

  fn description(&self) -> &'static str {
    "No plugin or artifact dependency is a pre-release"
  }

  fn reaches(&self) -> ReleaseState {
    ReleaseState::NoIntegrationDeps
  }

  fn run(&self, ctx: &CheckContext<'_>) -> GateResult<()> {
    check_plugins(ctx.project)?;
    check_artifacts(ctx.project)
  }
}

fn check_plugins(project: &Project) -> GateResult<()> {
  match project.plugins.iter().find(|plugin| plugin.version.is_integration()) {
    Some(plugin) => Err(GateError::UnreleasableDependency {
      kind: DependencyKind::Plugin,
      coordinate: plugin.coordinate(),
    }),
    None => Ok(()),
  }
}

fn check_artifacts(project: &Project) -> GateResult<()> {
  let Some(graph) = project.graph.as_ref() else {
    return Ok(());
  };

  let mut offender = String::new();
  let traversal = graph.traverse(graph.root(), project.settings.include_optional, |_, destination, _, _| {
    if destination.version.is_integration() {
      offender = destination.coordinate();
      Visit::Stop
    } else {
      Visit::Continue
    }
  });

  match traversal {
    Traversal::Stopped => Err(GateError::UnreleasableDependency {
      kind: DependencyKind::Artifact,
      coordinate: offender,
    }),
    Traversal::Completed => Ok(()),
  }
}
