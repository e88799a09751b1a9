//! Domain models and data structures for the rule engine.
//!
//! This module contains all the core data structures used throughout the application:
//!
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (Node, Operator, ResolvedNode)

mod config;
mod core;

// Re-export core types
pub use core::{Node, NodeBody, NodeId, NodeKind, Operator, ResolvedNode, UnknownOperator};

// Re-export config types
pub use config::{ConfigError, ConfigLoader, EngineConfig, StoreConfig};
