//! Integration tests for `cargo gate plan`

use crate::helpers::{TestRepo, run_cargo_gate};
use anyhow::Result;

#[test]
fn test_plan_json() -> Result<()> {
  let repo = TestRepo::new("1.0.0-rc.2")?;

  let run = run_cargo_gate(&repo.path, &["gate", "plan", "--json"])?;
  assert!(run.success(), "plan failed:\n{}", run.stderr);

  let plan: serde_json::Value = serde_json::from_str(&run.stdout)?;
  assert_eq!(plan["package"], "demo");
  assert_eq!(plan["tag"], "1.0.0-rc.2");
  assert_eq!(plan["integration"], true);
  assert_eq!(plan["workflow"], "directory dist");
  assert_eq!(plan["publications"][0]["name"], "demo");

  Ok(())
}

#[test]
fn test_plan_runs_no_git_commands() -> Result<()> {
  let dir = tempfile::tempdir()?;
  std::fs::write(
    dir.path().join("Cargo.toml"),
    "[package]\nname = \"loose\"\nversion = \"1.0.0\"\nedition = \"2021\"\n",
  )?;
  std::fs::create_dir_all(dir.path().join("src"))?;
  std::fs::write(dir.path().join("src/lib.rs"), "")?;

  let run = run_cargo_gate(dir.path(), &["gate", "plan"])?;

  assert!(run.success(), "plan failed:\n{}", run.stderr);
  assert!(run.stdout.contains("loose 1.0.0"));
  assert!(run.stdout.contains("none configured"));

  Ok(())
}
