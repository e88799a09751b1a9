//! Evaluates resolved rule trees against data records.
//!
//! Operands are field names looked up in the record. When the record has no such
//! field and the token is written as a literal (a quoted string, a number,
//! `true` or `false`) the literal value is used instead, so `age > 18` compares
//! the `age` field against the number 18. Both sides of every operator are
//! evaluated before the operator is applied.

use serde_json::{Map, Number, Value};
use std::collections::HashMap;

use super::error::RuleError;
use crate::models::{NodeKind, Operator, ResolvedNode};

/// Evaluates `tree` against `record`
///
/// # Arguments
/// * `tree` - Resolved tree to walk
/// * `record` - JSON object holding the fields the operands name
///
/// # Returns
/// * `Result<Value, RuleError>` - The operand value for a single-node tree,
///   otherwise the boolean result of the root operator
///
/// # Errors
/// - Returns `RuleError::InvalidInput` if `record` is not an object or a node is malformed
/// - Returns `RuleError::FieldNotFound` for an operand that is neither a field nor a literal
/// - Returns `RuleError::UnknownOperator` or `RuleError::UnknownNodeType` for foreign nodes
pub fn evaluate(tree: &ResolvedNode, record: &Value) -> Result<Value, RuleError> {
	let fields = record.as_object().ok_or_else(|| {
		RuleError::invalid_input(
			format!("data record must be a JSON object, got {}", type_name(record)),
			None,
			None,
		)
	})?;
	evaluate_node(tree, fields)
}

fn evaluate_node(node: &ResolvedNode, fields: &Map<String, Value>) -> Result<Value, RuleError> {
	let kind = node
		.kind
		.parse::<NodeKind>()
		.map_err(|kind| RuleError::unknown_node_type(kind, None, node_metadata(node)))?;

	match kind {
		NodeKind::Operand => {
			let name = node.value_text();
			if let Some(value) = fields.get(&name) {
				return Ok(value.clone());
			}
			literal_value(&name)
				.ok_or_else(|| RuleError::field_not_found(name, None, node_metadata(node)))
		}
		NodeKind::Literal => Ok(node.value.clone()),
		NodeKind::Operator => {
			let Value::String(symbol) = &node.value else {
				return Err(RuleError::invalid_input(
					format!("operator value must be a string, got {}", node.value),
					None,
					node_metadata(node),
				));
			};
			let operator = symbol.parse::<Operator>().map_err(|e| {
				RuleError::unknown_operator(symbol.clone(), Some(Box::new(e)), node_metadata(node))
			})?;

			let (Some(left), Some(right)) = (node.left.as_deref(), node.right.as_deref()) else {
				return Err(RuleError::invalid_input(
					format!("operator '{}' needs both a left and a right child", operator),
					None,
					node_metadata(node),
				));
			};

			let left = evaluate_node(left, fields)?;
			let right = evaluate_node(right, fields)?;
			Ok(Value::Bool(apply_operator(operator, &left, &right)))
		}
	}
}

/// Applies an operator to two already evaluated values
pub fn apply_operator(operator: Operator, left: &Value, right: &Value) -> bool {
	match operator {
		Operator::And => is_truthy(left) && is_truthy(right),
		Operator::Or => is_truthy(left) || is_truthy(right),
		Operator::Gt => to_number(left) > to_number(right),
		Operator::Lt => to_number(left) < to_number(right),
		Operator::Eq => to_text(left) == to_text(right),
	}
}

/// The value a literal-shaped operand token stands for
pub fn literal_value(token: &str) -> Option<Value> {
	if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
		return Some(Value::String(token[1..token.len() - 1].to_string()));
	}
	match token {
		"true" => return Some(Value::Bool(true)),
		"false" => return Some(Value::Bool(false)),
		_ => {}
	}
	if let Ok(integer) = token.parse::<i64>() {
		return Some(Value::from(integer));
	}
	token
		.parse::<f64>()
		.ok()
		.and_then(Number::from_f64)
		.map(Value::Number)
}

pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

/// Numeric view of a value; anything without one is NaN and compares false
pub fn to_number(value: &Value) -> f64 {
	match value {
		Value::Null => 0.0,
		Value::Bool(b) => f64::from(u8::from(*b)),
		Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
		Value::String(s) => {
			let trimmed = s.trim();
			if trimmed.is_empty() {
				0.0
			} else {
				trimmed.parse().unwrap_or(f64::NAN)
			}
		}
		Value::Array(_) | Value::Object(_) => f64::NAN,
	}
}

/// Text view of a value used by `=`.
///
/// Whole floats below 1e21 print in plain decimal without a fraction, so `20`
/// and `20.0` are equal and `1e20` prints as `100000000000000000000`. Larger
/// and fractional numbers keep their shortest round-trip form.
///
/// # Arguments
/// * `value` - A value taken from the record or from a literal operand
///
/// # Returns
/// * `String` - The text `=` compares
pub fn to_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Number(n) => match n.as_f64() {
			Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
				// negative zero prints as 0
				format!("{}", if f == 0.0 { 0.0 } else { f })
			}
			_ => n.to_string(),
		},
		other => other.to_string(),
	}
}

fn type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

fn node_metadata(node: &ResolvedNode) -> Option<HashMap<String, String>> {
	node.id
		.as_ref()
		.map(|id| HashMap::from([("node_id".to_string(), id.to_string())]))
}
