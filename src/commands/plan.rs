use crate::commands::{print_json, report_failure};
use crate::core::context::{PluginDependency, Project, Publication};
use crate::core::error::GateResult;
use crate::release::version::ReleaseVersion;
use serde::Serialize;
use std::path::Path;

/// What a release of this project would do
#[derive(Debug, Serialize)]
pub struct ReleasePlan<'a> {
  pub package: &'a str,
  pub version: &'a ReleaseVersion,
  pub tag: String,
  pub tag_message: String,
  /// The project's own version is a pre-release
  pub integration: bool,
  pub workflow: Option<String>,
  pub publications: &'a [Publication],
  pub plugins: &'a [PluginDependency],
  pub artifact_dependencies: usize,
  pub parallel_publish: bool,
  pub rollback_tag_on_publish_failure: bool,
}

impl<'a> ReleasePlan<'a> {
  pub fn new(project: &'a Project) -> Self {
    Self {
      package: &project.name,
      version: &project.version,
      tag: project.version.tag_name(),
      tag_message: project.version.tag_message(),
      integration: project.version.is_integration(),
      workflow: project.publish.as_ref().map(|w| w.describe()),
      publications: &project.publications,
      plugins: &project.plugins,
      artifact_dependencies: project.graph.as_ref().map(|g| g.dependency_count()).unwrap_or(0),
      parallel_publish: project.settings.parallel_publish,
      rollback_tag_on_publish_failure: project.settings.rollback_tag_on_publish_failure,
    }
  }
}

/// Run the plan command. Executes no git or publish commands.
pub fn run_plan(root: &Path, json: bool) -> GateResult<()> {
  let project = report_failure(Project::load(root), json)?;
  let plan = ReleasePlan::new(&project);

  if json {
    return print_json(&plan);
  }

  println!("📦 {} {}", plan.package, plan.version);
  println!("   tag:          {} (\"{}\")", plan.tag, plan.tag_message);
  match &plan.workflow {
    Some(workflow) => println!("   workflow:     {}", workflow),
    None => println!("   workflow:     ⚠️  none configured (add [publish] to gate.toml)"),
  }
  println!(
    "   publishing:   {}",
    if plan.parallel_publish { "parallel" } else { "sequential" }
  );

  println!("\n📤 Publications ({}):", plan.publications.len());
  for publication in plan.publications {
    match &publication.path {
      Some(path) => println!("   - {} ({})", publication.name, path.display()),
      None => println!("   - {}", publication.name),
    }
  }

  if !plan.plugins.is_empty() {
    println!("\n🔌 Plugins ({}):", plan.plugins.len());
    for plugin in plan.plugins {
      let marker = if plugin.version.is_integration() { " ⚠️  pre-release" } else { "" };
      println!("   - {}{}", plugin.coordinate(), marker);
    }
  }

  println!("\n🔗 Artifact dependencies: {}", plan.artifact_dependencies);

  if plan.integration {
    println!("\n⚠️  {} is a pre-release version", plan.version);
  }

  Ok(())
}
