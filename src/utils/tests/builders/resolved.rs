//! Test helper utilities for resolved rule trees
//!
//! - `ResolvedTreeBuilder`: Builder for creating test ResolvedNode trees

use serde_json::Value;

use crate::models::{NodeId, Operator, ResolvedNode};

/// Builder for creating test ResolvedNode trees
pub struct ResolvedTreeBuilder {
	node: ResolvedNode,
}

impl ResolvedTreeBuilder {
	/// A single operand leaf
	pub fn operand(value: &str) -> Self {
		Self {
			node: ResolvedNode::operand(value),
		}
	}

	pub fn literal(value: impl Into<Value>) -> Self {
		Self {
			node: ResolvedNode::literal(value),
		}
	}

	/// `field <operator> value`, both sides as operand leaves
	pub fn comparison(field: &str, operator: Operator, value: &str) -> Self {
		Self::operand(field).join(operator, Self::operand(value))
	}

	pub fn join(self, operator: Operator, right: ResolvedTreeBuilder) -> Self {
		Self {
			node: ResolvedNode::operator(operator, self.node, right.node),
		}
	}

	pub fn and(self, right: ResolvedTreeBuilder) -> Self {
		self.join(Operator::And, right)
	}

	pub fn or(self, right: ResolvedTreeBuilder) -> Self {
		self.join(Operator::Or, right)
	}

	pub fn id(mut self, id: &str) -> Self {
		self.node.id = Some(NodeId::new(id));
		self
	}

	pub fn build(self) -> ResolvedNode {
		self.node
	}
}
