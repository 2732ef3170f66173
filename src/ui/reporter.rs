//! Progress reporting sink for the release engine
//!
//! The engine announces each stage through a [`Reporter`]. Failures are not
//! reported here: they propagate as `GateError` to `main`, which prints them
//! and exits.

use super::progress::PublishProgress;
use std::sync::OnceLock;

pub trait Reporter: Sync {
  /// Stage start / informational message
  fn info(&self, msg: &str);

  /// Something finished successfully
  fn success(&self, msg: &str);

  /// Non-fatal problem worth surfacing
  fn warn(&self, msg: &str);

  /// Publishing of `total` publications is about to start
  fn publishing(&self, _total: usize) {}

  /// One publication attempt finished, successfully or not (called from worker threads)
  fn publication_finished(&self, name: &str, succeeded: bool) {
    if succeeded {
      self.success(&format!("Published {}", name));
    } else {
      self.warn(&format!("Failed to publish {}", name));
    }
  }
}

/// Console reporter
///
/// Writes to stdout, or to stderr when stdout is reserved for JSON output.
pub struct ConsoleReporter {
  to_stderr: bool,
  progress: OnceLock<PublishProgress>,
}

impl ConsoleReporter {
  pub fn new(json: bool) -> Self {
    Self {
      to_stderr: json,
      progress: OnceLock::new(),
    }
  }

  fn emit(&self, line: String) {
    if self.to_stderr {
      eprintln!("{}", line);
    } else {
      println!("{}", line);
    }
  }
}

impl Reporter for ConsoleReporter {
  fn info(&self, msg: &str) {
    self.emit(format!("🔍 {}", msg));
  }

  fn success(&self, msg: &str) {
    self.emit(format!("   ✅ {}", msg));
  }

  fn warn(&self, msg: &str) {
    self.emit(format!("⚠️  {}", msg));
  }

  fn publishing(&self, total: usize) {
    if total > 1 && !self.to_stderr {
      let _ = self.progress.set(PublishProgress::new(total, "Publishing"));
    }
  }

  fn publication_finished(&self, name: &str, succeeded: bool) {
    match self.progress.get() {
      Some(progress) => progress.inc(),
      None if succeeded => self.success(&format!("Published {}", name)),
      None => self.warn(&format!("Failed to publish {}", name)),
    }
  }
}
