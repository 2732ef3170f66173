//! Integration tests for `cargo gate check`

use crate::helpers::{TestRepo, run_cargo_gate};
use anyhow::Result;

#[test]
fn test_check_passes_without_side_effects() -> Result<()> {
  let repo = TestRepo::new("0.5.0")?;

  let run = run_cargo_gate(&repo.path, &["gate", "check"])?;

  assert!(run.success(), "check failed:\n{}", run.stderr);
  assert!(run.stdout.contains("ready to release"));
  assert!(repo.tags()?.is_empty());
  assert!(!repo.file_exists("dist"));

  Ok(())
}

#[test]
fn test_check_json_reports_failure_on_stdout() -> Result<()> {
  let repo = TestRepo::new("0.5.0")?;
  repo.write("scratch.txt", "wip\n")?;

  let run = run_cargo_gate(&repo.path, &["gate", "check", "--json"])?;

  assert_eq!(run.code, Some(3));
  let failure: serde_json::Value = serde_json::from_str(&run.stdout)?;
  assert_eq!(failure["error"], "dirty-state");
  assert_eq!(failure["exit_code"], 3);

  Ok(())
}

#[test]
fn test_check_json_success_report() -> Result<()> {
  let repo = TestRepo::new("0.5.0")?;

  let run = run_cargo_gate(&repo.path, &["gate", "check", "--json"])?;
  assert!(run.success(), "check failed:\n{}", run.stderr);

  let report: serde_json::Value = serde_json::from_str(&run.stdout)?;
  assert_eq!(report["state"], "no-integration-deps");
  assert!(report.get("tag").is_none());

  Ok(())
}
