//! Reporting module.
//!
//! Turns an analysis result into console text.

mod console;

pub use console::ConsoleReport;
