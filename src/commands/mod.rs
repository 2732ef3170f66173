//! CLI commands for cargo-gate
//!
//! - **plan**: show the project facts a release would act on
//! - **check**: run the preflight checks without tagging or publishing
//! - **release**: the full guarded release
//!
//! Every command loads the [`Project`] itself, so load failures are reported
//! the same way as stage failures (including the `--json` failure body).

pub mod check;
pub mod plan;
pub mod release;

pub use check::run_check;
pub use plan::run_plan;
pub use release::run_release;

use crate::checks::verify_root;
use crate::core::config::GateConfig;
use crate::core::context::Project;
use crate::core::error::GateResult;
use crate::release::FailureReport;
use serde::Serialize;
use std::path::Path;

/// Load a project that is about to be checked or released.
///
/// The repository guard runs on gate.toml alone first, so a directory that
/// cannot be released never reaches `cargo metadata`.
pub(crate) fn load_release_project(root: &Path) -> GateResult<Project> {
  let config = GateConfig::load(root)?;
  verify_root(root, config.publish.as_ref())?;
  Project::from_config(root, config)
}

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> GateResult<()> {
  let json = serde_json::to_string_pretty(value)?;
  println!("{}", json);
  Ok(())
}

/// In JSON mode, mirror a failure on stdout before it propagates to `main`
pub(crate) fn report_failure<T>(result: GateResult<T>, json: bool) -> GateResult<T> {
  if json && let Err(err) = &result {
    print_json(&FailureReport::from(err))?;
  }
  result
}
