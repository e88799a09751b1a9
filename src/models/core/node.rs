//! Rule tree node data structures.
//!
//! A rule is stored as a set of independently addressable nodes. Operator nodes
//! reference their two children by [`NodeId`]; operand nodes are leaves holding the
//! raw token text. Nodes are immutable once created and may be shared between
//! several parents after combination.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Opaque identifier assigned to a node by the node store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
	/// Wraps an already assigned identifier
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Generates a fresh random identifier
	pub fn generate() -> Self {
		Self(uuid::Uuid::new_v4().to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

/// The fixed set of operators a rule can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
	And,
	Or,
	Gt,
	Lt,
	Eq,
}

impl Operator {
	pub const ALL: [Operator; 5] = [
		Operator::And,
		Operator::Or,
		Operator::Gt,
		Operator::Lt,
		Operator::Eq,
	];

	/// Textual symbol used in rule strings
	pub fn symbol(&self) -> &'static str {
		match self {
			Operator::And => "AND",
			Operator::Or => "OR",
			Operator::Gt => ">",
			Operator::Lt => "<",
			Operator::Eq => "=",
		}
	}

	/// Binding strength used by the tree builder. Comparisons bind tighter than
	/// `AND`, which binds tighter than `OR`.
	pub fn precedence(&self) -> u8 {
		match self {
			Operator::Gt | Operator::Lt | Operator::Eq => 3,
			Operator::And => 2,
			Operator::Or => 1,
		}
	}
}

impl fmt::Display for Operator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.symbol())
	}
}

/// Returned when a string is not one of the five operator symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperator(pub String);

impl fmt::Display for UnknownOperator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown operator '{}'", self.0)
	}
}

impl std::error::Error for UnknownOperator {}

impl FromStr for Operator {
	type Err = UnknownOperator;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"AND" => Ok(Operator::And),
			"OR" => Ok(Operator::Or),
			">" => Ok(Operator::Gt),
			"<" => Ok(Operator::Lt),
			"=" => Ok(Operator::Eq),
			other => Err(UnknownOperator(other.to_string())),
		}
	}
}

impl Serialize for Operator {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.symbol())
	}
}

impl<'de> Deserialize<'de> for Operator {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let symbol = String::deserialize(deserializer)?;
		symbol.parse().map_err(serde::de::Error::custom)
	}
}

/// Node kinds understood by the evaluator.
///
/// `Literal` never comes out of the tree builder; it only appears in trees
/// constructed by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	Operand,
	Operator,
	Literal,
}

impl NodeKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			NodeKind::Operand => "operand",
			NodeKind::Operator => "operator",
			NodeKind::Literal => "literal",
		}
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for NodeKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"operand" => Ok(NodeKind::Operand),
			"operator" => Ok(NodeKind::Operator),
			"literal" => Ok(NodeKind::Literal),
			other => Err(other.to_string()),
		}
	}
}

/// Content of a stored node. Children exist only on operator nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeBody {
	Operand {
		value: String,
	},
	Operator {
		value: Operator,
		left: NodeId,
		right: NodeId,
	},
}

impl NodeBody {
	pub fn operand(value: impl Into<String>) -> Self {
		NodeBody::Operand {
			value: value.into(),
		}
	}

	pub fn operator(operator: Operator, left: NodeId, right: NodeId) -> Self {
		NodeBody::Operator {
			value: operator,
			left,
			right,
		}
	}

	pub fn kind(&self) -> NodeKind {
		match self {
			NodeBody::Operand { .. } => NodeKind::Operand,
			NodeBody::Operator { .. } => NodeKind::Operator,
		}
	}
}

/// A node as held by a node store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
	pub id: NodeId,
	#[serde(flatten)]
	pub body: NodeBody,
}

impl Node {
	pub fn new(id: NodeId, body: NodeBody) -> Self {
		Self { id, body }
	}

	pub fn kind(&self) -> NodeKind {
		self.body.kind()
	}

	/// Child identifiers of an operator node
	pub fn children(&self) -> Option<(&NodeId, &NodeId)> {
		match &self.body {
			NodeBody::Operator { left, right, .. } => Some((left, right)),
			NodeBody::Operand { .. } => None,
		}
	}
}
