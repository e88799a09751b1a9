//! Error types for parsing, combining, evaluating and rendering rules.
//!
//! Tokenizer and builder failures are plain enums since they describe the shape
//! of the input. Evaluation and lookup failures carry an [`ErrorContext`] and are
//! logged when created, like every other runtime error of the crate.

use crate::{
	models::Operator,
	repositories::RepositoryError,
	utils::logging::error::{ErrorContext, TraceableError},
};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Malformed quoting in a rule string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
	/// A `'` opened a string literal that is never closed
	#[error("unterminated string literal: {literal}")]
	UnterminatedLiteral { literal: String },

	/// A token closes a string literal that was never opened
	#[error("string literal closed without being opened: {token}")]
	UnopenedLiteral { token: String },
}

/// A token sequence that does not form a single tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
	#[error("expression is empty")]
	EmptyExpression,

	#[error("unmatched ')' at token {position}")]
	UnmatchedClosingParen { position: usize },

	#[error("unmatched '('")]
	UnmatchedOpeningParen,

	#[error("operator '{operator}' is missing an operand")]
	MissingOperand { operator: Operator },

	#[error("{count} operands are not joined by an operator")]
	DanglingOperands { count: usize },

	#[error("at least one rule is required")]
	EmptyRuleSet,

	/// The tree would nest deeper than the arena allows
	#[error("expression nests deeper than {limit} levels")]
	TooDeep { limit: usize },
}

#[derive(Debug, Error)]
pub enum RuleError {
	#[error("Tokenize error: {0}")]
	Tokenize(#[from] TokenizeError),

	#[error("Build error: {0}")]
	Build(#[from] BuildError),

	/// An operator node holds a value outside the supported operator set
	#[error("Unknown operator: {0}")]
	UnknownOperator(Box<ErrorContext>),

	/// A node kind other than operand, operator or literal
	#[error("Unknown node type: {0}")]
	UnknownNodeType(Box<ErrorContext>),

	/// An operand refers to a field the data record does not have
	#[error("Field not found: {0}")]
	FieldNotFound(Box<ErrorContext>),

	/// The tree or the data record has the wrong shape
	#[error("Invalid input: {0}")]
	InvalidInput(Box<ErrorContext>),

	/// The node store has no node with the requested identifier
	#[error("Node not found: {0}")]
	NodeNotFound(Box<ErrorContext>),

	#[error("Store error: {0}")]
	Repository(#[from] RepositoryError),
}

impl RuleError {
	/// Creates an unknown operator error and logs it
	///
	/// # Arguments
	/// * `operator` - The operator text that was not recognised
	/// * `source` - Underlying error, if any
	/// * `metadata` - Extra key-value pairs, such as the node identifier
	///
	/// # Returns
	/// * `Self` - `RuleError::UnknownOperator` carrying a fresh trace id
	pub fn unknown_operator(
		operator: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::UnknownOperator(Box::new(ErrorContext::new_with_log(
			operator, source, metadata,
		)))
	}

	// Unknown node type, logged
	pub fn unknown_node_type(
		kind: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::UnknownNodeType(Box::new(ErrorContext::new_with_log(
			kind, source, metadata,
		)))
	}

	/// Creates a field not found error and logs it
	///
	/// # Arguments
	/// * `field` - Name of the operand missing from the record
	/// * `source` - Underlying error, if any
	/// * `metadata` - Extra key-value pairs, such as the node identifier
	///
	/// # Returns
	/// * `Self` - `RuleError::FieldNotFound` carrying a fresh trace id
	pub fn field_not_found(
		field: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::FieldNotFound(Box::new(ErrorContext::new_with_log(
			field, source, metadata,
		)))
	}

	// Invalid input, logged
	pub fn invalid_input(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InvalidInput(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	/// Creates a node not found error and logs it
	///
	/// # Arguments
	/// * `node_id` - Identifier the store has no node for
	/// * `source` - Underlying error, if any
	/// * `metadata` - Extra key-value pairs
	///
	/// # Returns
	/// * `Self` - `RuleError::NodeNotFound` carrying a fresh trace id
	pub fn node_not_found(
		node_id: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::NodeNotFound(Box::new(ErrorContext::new_with_log(
			node_id, source, metadata,
		)))
	}
}

impl TraceableError for RuleError {
	fn trace_id(&self) -> String {
		match self {
			Self::UnknownOperator(ctx)
			| Self::UnknownNodeType(ctx)
			| Self::FieldNotFound(ctx)
			| Self::InvalidInput(ctx)
			| Self::NodeNotFound(ctx) => ctx.trace_id.clone(),
			Self::Repository(err) => err.trace_id(),
			Self::Tokenize(_) | Self::Build(_) => Uuid::new_v4().to_string(),
		}
	}
}
