//! Utility modules for common functionality.
//!
//! - logging: Logging setup and the shared error context
//! - parsing: Parsing of command line values
//! - tests: Builders for rule trees used in tests

pub mod logging;
pub mod parsing;
pub mod tests;

pub use parsing::*;
