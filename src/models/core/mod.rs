//! Core domain models for the rule engine.
//!
//! This module contains the fundamental data structures that represent:
//! - Nodes: Individually stored operator and operand nodes of a rule tree
//! - Resolved trees: Rule trees with children inlined, ready for evaluation

mod node;
mod resolved;

pub use node::{Node, NodeBody, NodeId, NodeKind, Operator, UnknownOperator};
pub use resolved::ResolvedNode;
