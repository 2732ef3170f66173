use crate::commands::{load_release_project, print_json, report_failure};
use crate::core::error::GateResult;
use crate::core::vcs::SystemGit;
use crate::release::{ReleaseEngine, WorkflowTransport};
use crate::ui::ConsoleReporter;
use std::path::Path;

/// Run the full guarded release: checks, tag, publish
pub fn run_release(root: &Path, json: bool, sequential: bool) -> GateResult<()> {
  let mut project = report_failure(load_release_project(root), json)?;
  if sequential {
    project.settings.parallel_publish = false;
  }

  let timeout = project.settings.command_timeout();
  let git = SystemGit::new(project.root(), project.settings.remote.clone(), timeout);
  let transport = WorkflowTransport::new(project.root(), timeout);
  let reporter = ConsoleReporter::new(json);

  let report = report_failure(ReleaseEngine::new(&project, &git, &transport, &reporter).release(), json)?;

  if json {
    print_json(&report)?;
  } else {
    let tag = report.tag.as_deref().unwrap_or_default();
    println!(
      "\n🎉 Released {} {} (tag {}, {} publication(s))",
      report.package,
      report.version,
      tag,
      report.published.len()
    );
  }

  Ok(())
}
