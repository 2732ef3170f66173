//! Terminal output: reporting sink and progress bars

pub mod progress;
pub mod reporter;

pub use reporter::{ConsoleReporter, Reporter};
