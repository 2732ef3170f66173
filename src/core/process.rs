//! Bounded subprocess execution
//!
//! Every external command (git, cargo publish, custom publish commands) goes
//! through [`run_captured`]. Output is drained on reader threads while the
//! child runs; the child is killed once the timeout elapses.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use wait_timeout::ChildExt;

/// Exit status plus combined stdout/stderr of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
  /// Process exit code (0 = success, -1 when killed by a signal)
  pub exit_code: i32,
  /// Captured stdout followed by captured stderr
  pub output: String,
}

impl CommandResult {
  pub fn new(exit_code: i32, output: impl Into<String>) -> Self {
    Self {
      exit_code,
      output: output.into(),
    }
  }

  /// Whether the command exited with status 0
  pub fn success(&self) -> bool {
    self.exit_code == 0
  }
}

/// Why a command produced no [`CommandResult`]
#[derive(Debug)]
pub enum RunError {
  /// The process could not be spawned or waited on
  Spawn(std::io::Error),
  /// The process outlived its timeout and was killed
  TimedOut(Duration),
}

/// Run a command to completion, capturing combined output.
///
/// `timeout = None` waits indefinitely.
pub fn run_captured(mut cmd: Command, timeout: Option<Duration>) -> Result<CommandResult, RunError> {
  cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());

  let mut child = cmd.spawn().map_err(RunError::Spawn)?;

  let stdout = child.stdout.take().map(drain);
  let stderr = child.stderr.take().map(drain);

  let status = match timeout {
    Some(limit) => match child.wait_timeout(limit).map_err(RunError::Spawn)? {
      Some(status) => status,
      None => {
        let _ = child.kill();
        let _ = child.wait();
        return Err(RunError::TimedOut(limit));
      }
    },
    None => child.wait().map_err(RunError::Spawn)?,
  };

  let mut output = collect(stdout);
  output.push_str(&collect(stderr));

  Ok(CommandResult {
    exit_code: status.code().unwrap_or(-1),
    output,
  })
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
  thread::spawn(move || {
    let mut buf = Vec::new();
    let _ = pipe.read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
  })
}

fn collect(handle: Option<thread::JoinHandle<String>>) -> String {
  handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

/// Human-readable rendering of a command line for error messages
pub fn describe(program: &str, args: &[String]) -> String {
  if args.is_empty() {
    program.to_string()
  } else {
    format!("{} {}", program, args.join(" "))
  }
}
