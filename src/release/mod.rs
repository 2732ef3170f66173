//! Guarded release pipeline
//!
//! # Architecture
//!
//! - **version**: release version and its tag mapping
//! - **state**: release state machine
//! - **engine**: runs the checks, then the tag writer, then the publisher
//! - **tagging**: annotated tag creation (and optional removal)
//! - **publish**: uploads every publication, collecting all failures
//! - **transport**: how one publication is uploaded (cargo, directory, command)
//! - **report**: serialisable run summaries for `--json`

pub mod engine;
pub mod publish;
pub mod report;
pub mod state;
pub mod tagging;
pub mod transport;
pub mod version;

pub use engine::ReleaseEngine;
pub use report::FailureReport;
pub use transport::WorkflowTransport;
