use crate::commands::{load_release_project, print_json, report_failure};
use crate::core::error::GateResult;
use crate::core::vcs::SystemGit;
use crate::release::{ReleaseEngine, WorkflowTransport};
use crate::ui::ConsoleReporter;
use std::path::Path;

/// Run every release precondition without tagging or publishing
pub fn run_check(root: &Path, json: bool) -> GateResult<()> {
  let project = report_failure(load_release_project(root), json)?;
  let timeout = project.settings.command_timeout();
  let git = SystemGit::new(project.root(), project.settings.remote.clone(), timeout);
  let transport = WorkflowTransport::new(project.root(), timeout);
  let reporter = ConsoleReporter::new(json);

  let report = report_failure(ReleaseEngine::new(&project, &git, &transport, &reporter).preflight(), json)?;

  if json {
    print_json(&report)?;
  } else {
    println!("\n✅ {} {} is ready to release", report.package, report.version);
  }

  Ok(())
}
