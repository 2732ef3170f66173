//! Publisher
//!
//! Hands every publication to the transport. Publications are independent, so
//! they may upload concurrently on the rayon pool. Every publication is
//! attempted and every failure is collected; the engine decides what a partial
//! failure means for the already-written tag.

use crate::core::config::PublishWorkflow;
use crate::core::context::{Project, Publication};
use crate::core::error::{GateResult, PublishFailure};
use crate::release::transport::PublishTransport;
use crate::ui::Reporter;
use rayon::prelude::*;

/// What happened to each publication
#[derive(Debug, Default)]
pub struct PublishOutcome {
  pub published: Vec<String>,
  pub failures: Vec<PublishFailure>,
}

impl PublishOutcome {
  pub fn is_success(&self) -> bool {
    self.failures.is_empty()
  }
}

/// Publish all of the project's publications through `workflow`
pub fn publish_all(
  project: &Project,
  workflow: &PublishWorkflow,
  transport: &dyn PublishTransport,
  reporter: &dyn Reporter,
) -> PublishOutcome {
  reporter.publishing(project.publications.len());

  let upload = |publication: &Publication| -> (String, GateResult<()>) {
    let result = transport.publish(publication, &project.version, workflow);
    reporter.publication_finished(&publication.name, result.is_ok());
    (publication.name.clone(), result)
  };

  let results: Vec<(String, GateResult<()>)> = if project.settings.parallel_publish {
    project.publications.par_iter().map(upload).collect()
  } else {
    project.publications.iter().map(upload).collect()
  };

  let mut outcome = PublishOutcome::default();
  for (name, result) in results {
    match result {
      Ok(()) => outcome.published.push(name),
      Err(err) => outcome.failures.push(PublishFailure {
        publication: name,
        reason: err.to_string(),
      }),
    }
  }
  outcome
}
