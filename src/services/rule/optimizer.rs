//! Combines several rule trees into one.
//!
//! Trees are folded left to right. Each step tries a small set of peephole
//! rewrites and falls back to joining both sides with `AND`. The rewrites only
//! look at the roots and their direct children; nothing deeper is simplified.

use std::collections::HashSet;

use tracing::debug;

use super::{
	arena::{ArenaNode, NodeIndex, RuleArena},
	builder::within_depth_limit,
	error::BuildError,
};
use crate::models::Operator;

/// Folds `roots` into a single tree, in order.
///
/// # Arguments
/// * `arena` - Arena holding every root; new `AND` nodes are appended to it
/// * `roots` - Trees to combine, left to right
///
/// # Returns
/// * `Result<NodeIndex, BuildError>` - Root of the combined tree, or an error
///   when `roots` is empty or the fold nests deeper than the arena allows
pub fn combine_all(arena: &mut RuleArena, roots: &[NodeIndex]) -> Result<NodeIndex, BuildError> {
	let (first, rest) = roots.split_first().ok_or(BuildError::EmptyRuleSet)?;
	rest.iter().try_fold(*first, |combined, next| {
		let node = combine(arena, combined, *next);
		within_depth_limit(arena, node)
	})
}

/// Combines two trees, returning either an existing node or a new `AND` node
pub fn combine(arena: &mut RuleArena, a: NodeIndex, b: NodeIndex) -> NodeIndex {
	if let Some(simplified) = simplify(arena, a, b) {
		return simplified;
	}

	if has_repeated_operand(arena, a, b) {
		debug!(
			left = %arena.render(a),
			right = %arena.render(b),
			"trees share an operand value"
		);
	}

	arena.push_operator(Operator::And, a, b)
}

fn simplify(arena: &RuleArena, a: NodeIndex, b: NodeIndex) -> Option<NodeIndex> {
	if arena.same_tree(a, b) {
		debug!(node = %arena.render(a), "dropping duplicate tree");
		return Some(a);
	}

	if let Some(shared) = shared_and_left_operand(arena, a, b) {
		debug!(operand = %arena.render(shared), "collapsing conjunctions on shared left operand");
		return Some(shared);
	}

	if let Some(absorbed) = absorb_boolean_operand(arena, a, b) {
		debug!(result = %arena.render(absorbed), "absorbing boolean operand");
		return Some(absorbed);
	}

	None
}

/// Two `AND` nodes whose left children are operands with the same value
/// collapse to the left child of `a`.
fn shared_and_left_operand(arena: &RuleArena, a: NodeIndex, b: NodeIndex) -> Option<NodeIndex> {
	let (
		ArenaNode::Operator {
			operator: Operator::And,
			left: left_a,
			..
		},
		ArenaNode::Operator {
			operator: Operator::And,
			left: left_b,
			..
		},
	) = (arena.node(a), arena.node(b))
	else {
		return None;
	};

	match (arena.node(*left_a), arena.node(*left_b)) {
		(ArenaNode::Operand(x), ArenaNode::Operand(y)) if x == y => Some(*left_a),
		_ => None,
	}
}

/// Identity and annihilator laws for a logical node joined with a `true` or
/// `false` operand token
fn absorb_boolean_operand(arena: &RuleArena, a: NodeIndex, b: NodeIndex) -> Option<NodeIndex> {
	let ArenaNode::Operator { operator, .. } = arena.node(a) else {
		return None;
	};
	let ArenaNode::Operand(value) = arena.node(b) else {
		return None;
	};

	match (operator, value.as_str()) {
		(Operator::And, "true") | (Operator::Or, "false") => Some(a),
		(Operator::And, "false") | (Operator::Or, "true") => Some(b),
		_ => None,
	}
}

/// Whether any operand value occurs twice across both trees
fn has_repeated_operand(arena: &RuleArena, a: NodeIndex, b: NodeIndex) -> bool {
	let mut seen = HashSet::new();
	let mut pending = vec![b, a];
	while let Some(index) = pending.pop() {
		match arena.node(index) {
			ArenaNode::Operand(value) => {
				if !seen.insert(value.as_str()) {
					return true;
				}
			}
			ArenaNode::Operator { left, right, .. } => {
				pending.push(*right);
				pending.push(*left);
			}
		}
	}
	false
}
