//! Core services implementing the business logic.
//!
//! - `rule`: Tokenizing, building, combining, evaluating and rendering rule trees

pub mod rule;
