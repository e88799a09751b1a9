//! Builds rule trees from token sequences.
//!
//! Precedence parsing with an operand stack and an operator stack. One shortcut
//! shapes every tree the builder produces: when an operand is directly followed
//! by an operator and another operand, the three tokens become a subtree on the
//! spot, whatever the operator is. `a OR b AND c` therefore builds
//! `((a OR b) AND c)`.
//!
//! Trees deeper than [`MAX_TREE_DEPTH`] are rejected as soon as a node would
//! cross the limit.

use tracing::debug;

use super::{
	arena::{NodeIndex, RuleArena, MAX_TREE_DEPTH},
	error::BuildError,
	tokenizer::is_operator,
};
use crate::models::Operator;

#[derive(Debug, Clone, Copy)]
enum Pending {
	OpenParen,
	Operator(Operator),
}

/// Builds a tree for `tokens` inside `arena`
///
/// # Arguments
/// * `arena` - Arena the new nodes are appended to
/// * `tokens` - Output of the tokenizer
///
/// # Returns
/// * `Result<NodeIndex, BuildError>` - Root of the new tree
pub fn build_tree<T: AsRef<str>>(
	arena: &mut RuleArena,
	tokens: &[T],
) -> Result<NodeIndex, BuildError> {
	if tokens.is_empty() {
		return Err(BuildError::EmptyExpression);
	}

	let mut operands: Vec<NodeIndex> = Vec::new();
	let mut operators: Vec<Pending> = Vec::new();

	let mut position = 0;
	while position < tokens.len() {
		let token = tokens[position].as_ref();

		match token {
			"(" => operators.push(Pending::OpenParen),
			")" => loop {
				match operators.pop() {
					Some(Pending::Operator(operator)) => reduce(arena, &mut operands, operator)?,
					Some(Pending::OpenParen) => break,
					None => return Err(BuildError::UnmatchedClosingParen { position }),
				}
			},
			_ => {
				if let Ok(operator) = token.parse::<Operator>() {
					while let Some(Pending::Operator(top)) = operators.last().copied() {
						if top.precedence() < operator.precedence() {
							break;
						}
						operators.pop();
						reduce(arena, &mut operands, top)?;
					}
					operators.push(Pending::Operator(operator));
				} else if let Some((operator, right)) = eager_comparison(tokens, position) {
					let left_node = arena.push_operand(token);
					let right_node = arena.push_operand(right);
					let node = arena.push_operator(operator, left_node, right_node);
					debug!(left = token, operator = %operator, right, "built eager subtree");
					operands.push(within_depth_limit(arena, node)?);
					position += 2;
				} else {
					operands.push(arena.push_operand(token));
				}
			}
		}

		position += 1;
	}

	while let Some(pending) = operators.pop() {
		match pending {
			Pending::Operator(operator) => reduce(arena, &mut operands, operator)?,
			Pending::OpenParen => return Err(BuildError::UnmatchedOpeningParen),
		}
	}

	match operands.as_slice() {
		[] => Err(BuildError::EmptyExpression),
		[root] => Ok(*root),
		rest => Err(BuildError::DanglingOperands { count: rest.len() }),
	}
}

/// The operator and right operand of an operand-operator-operand run starting
/// right after `position`
fn eager_comparison<T: AsRef<str>>(tokens: &[T], position: usize) -> Option<(Operator, &str)> {
	if position + 2 >= tokens.len() {
		return None;
	}
	let operator = tokens[position + 1].as_ref().parse::<Operator>().ok()?;
	let right = tokens[position + 2].as_ref();
	if is_operator(right) || right == "(" || right == ")" {
		return None;
	}
	Some((operator, right))
}

fn reduce(
	arena: &mut RuleArena,
	operands: &mut Vec<NodeIndex>,
	operator: Operator,
) -> Result<(), BuildError> {
	let right = operands.pop();
	let left = operands.pop();
	let (Some(left), Some(right)) = (left, right) else {
		return Err(BuildError::MissingOperand { operator });
	};
	let node = arena.push_operator(operator, left, right);
	operands.push(within_depth_limit(arena, node)?);
	Ok(())
}

/// Passes `node` through unless its subtree is deeper than [`MAX_TREE_DEPTH`]
pub(super) fn within_depth_limit(
	arena: &RuleArena,
	node: NodeIndex,
) -> Result<NodeIndex, BuildError> {
	if arena.depth(node) > MAX_TREE_DEPTH {
		return Err(BuildError::TooDeep {
			limit: MAX_TREE_DEPTH,
		});
	}
	Ok(node)
}
