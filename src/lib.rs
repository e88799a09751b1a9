//! Rule engine library.
//!
//! Parses boolean rule expressions such as `age > 30 AND department = 'Sales'`
//! into trees of nodes, combines several rules into one tree, evaluates trees
//! against JSON data records and turns stored trees back into expressions.
//!
//! # Module Structure
//!
//! - `bootstrap`: Builds a rule service from the engine configuration
//! - `models`: Nodes, operators, resolved trees and configuration
//! - `repositories`: Node stores
//! - `services`: Rule parsing, combination and evaluation
//! - `utils`: Logging, error context and parsing helpers

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
