//! Progress indicators for publishing
//!
//! Uses `linya` for allocation-free, concurrency-optimized progress bars.
//! Publications may upload on several threads at once, so the bar is shared
//! behind a mutex.

use linya::{Bar, Progress};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Thread-safe progress bar counting finished publication attempts
pub struct PublishProgress {
  progress: Mutex<Progress>,
  bar: Bar,
  finished: AtomicUsize,
}

impl PublishProgress {
  /// Create a new progress bar for `total` publications
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self {
      progress: Mutex::new(progress),
      bar,
      finished: AtomicUsize::new(0),
    }
  }

  /// Increment progress by 1 (thread-safe)
  pub fn inc(&self) {
    self.finished.fetch_add(1, Ordering::Relaxed);
    // A poisoned lock only means another thread panicked mid-draw; skip the redraw
    if let Ok(mut progress) = self.progress.lock() {
      progress.inc_and_draw(&self.bar, 1);
    }
  }

  /// Attempts counted so far
  pub fn position(&self) -> usize {
    self.finished.load(Ordering::Relaxed)
  }
}
