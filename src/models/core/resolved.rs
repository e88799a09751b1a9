//! Fully dereferenced rule trees.
//!
//! A [`ResolvedNode`] carries its children inline instead of by identifier, which
//! is the shape the evaluator walks. It is deliberately loose (kind and value are
//! free-form) because resolved trees may arrive from outside the crate as JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{NodeId, NodeKind, Operator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedNode {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<NodeId>,
	#[serde(rename = "type")]
	pub kind: String,
	pub value: Value,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub left: Option<Box<ResolvedNode>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub right: Option<Box<ResolvedNode>>,
}

impl ResolvedNode {
	pub fn operand(value: impl Into<String>) -> Self {
		Self {
			id: None,
			kind: NodeKind::Operand.to_string(),
			value: Value::String(value.into()),
			left: None,
			right: None,
		}
	}

	pub fn literal(value: impl Into<Value>) -> Self {
		Self {
			id: None,
			kind: NodeKind::Literal.to_string(),
			value: value.into(),
			left: None,
			right: None,
		}
	}

	pub fn operator(operator: Operator, left: ResolvedNode, right: ResolvedNode) -> Self {
		Self {
			id: None,
			kind: NodeKind::Operator.to_string(),
			value: Value::String(operator.to_string()),
			left: Some(Box::new(left)),
			right: Some(Box::new(right)),
		}
	}

	pub fn with_id(mut self, id: NodeId) -> Self {
		self.id = Some(id);
		self
	}

	/// The node value as text, the way operand lookups and rendering see it
	pub fn value_text(&self) -> String {
		match &self.value {
			Value::String(s) => s.clone(),
			other => other.to_string(),
		}
	}
}
