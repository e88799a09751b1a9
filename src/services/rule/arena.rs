//! In-memory rule trees.
//!
//! Trees under construction live in a [`RuleArena`], a flat vector of nodes
//! addressed by [`NodeIndex`]. A node is always pushed after its children, so
//! the vector is topologically ordered and a child index is always smaller than
//! its parent's. Combination shares subtrees freely; the arena never mutates a
//! node once pushed.
//!
//! Every node records its depth. The builder and the combiner refuse trees
//! deeper than [`MAX_TREE_DEPTH`], which bounds the recursion of every walk
//! over a finished tree (rendering, evaluation, storage round trips).

use std::collections::HashSet;

use crate::models::{Operator, ResolvedNode};

/// Deepest tree the builder and the combiner will produce. An operand has depth
/// 1, so a chain of `n` comparisons joined by `AND` is `n + 1` deep.
pub const MAX_TREE_DEPTH: usize = 1024;

/// Position of a node inside its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(u32);

impl NodeIndex {
	pub fn as_usize(self) -> usize {
		self.0 as usize
	}

	fn offset(self, by: u32) -> Self {
		NodeIndex(self.0 + by)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArenaNode {
	Operand(String),
	Operator {
		operator: Operator,
		left: NodeIndex,
		right: NodeIndex,
	},
}

#[derive(Debug, Clone, Default)]
pub struct RuleArena {
	nodes: Vec<ArenaNode>,
	depths: Vec<u32>,
}

impl RuleArena {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn push_operand(&mut self, value: impl Into<String>) -> NodeIndex {
		self.push(ArenaNode::Operand(value.into()), 1)
	}

	/// Pushes an operator node over two existing nodes of this arena
	pub fn push_operator(
		&mut self,
		operator: Operator,
		left: NodeIndex,
		right: NodeIndex,
	) -> NodeIndex {
		debug_assert!(left.as_usize() < self.nodes.len());
		debug_assert!(right.as_usize() < self.nodes.len());
		let depth = 1 + self.depths[left.as_usize()].max(self.depths[right.as_usize()]);
		self.push(
			ArenaNode::Operator {
				operator,
				left,
				right,
			},
			depth,
		)
	}

	fn push(&mut self, node: ArenaNode, depth: u32) -> NodeIndex {
		let index = NodeIndex(self.nodes.len() as u32);
		self.nodes.push(node);
		self.depths.push(depth);
		index
	}

	/// Number of levels in the subtree rooted at `index`
	///
	/// # Panics
	///
	/// Panics if `index` was not handed out by this arena.
	pub fn depth(&self, index: NodeIndex) -> usize {
		self.depths[index.as_usize()] as usize
	}

	pub fn get(&self, index: NodeIndex) -> Option<&ArenaNode> {
		self.nodes.get(index.as_usize())
	}

	/// # Panics
	///
	/// Panics if `index` was not handed out by this arena.
	pub fn node(&self, index: NodeIndex) -> &ArenaNode {
		&self.nodes[index.as_usize()]
	}

	/// Moves every node of `other` to the end of this arena.
	///
	/// Returns a function translating indices of `other` into indices of `self`.
	pub fn absorb(&mut self, other: RuleArena) -> impl Fn(NodeIndex) -> NodeIndex {
		let base = self.nodes.len() as u32;
		self.nodes.extend(other.nodes.into_iter().map(|node| match node {
			ArenaNode::Operand(value) => ArenaNode::Operand(value),
			ArenaNode::Operator {
				operator,
				left,
				right,
			} => ArenaNode::Operator {
				operator,
				left: left.offset(base),
				right: right.offset(base),
			},
		}));
		self.depths.extend(other.depths);
		move |index: NodeIndex| index.offset(base)
	}

	/// Indices of every node reachable from `root`, children before parents
	pub fn reachable_from(&self, root: NodeIndex) -> Vec<NodeIndex> {
		let mut seen = HashSet::new();
		let mut pending = vec![root];
		while let Some(index) = pending.pop() {
			if !seen.insert(index) {
				continue;
			}
			if let ArenaNode::Operator { left, right, .. } = self.node(index) {
				pending.push(*left);
				pending.push(*right);
			}
		}

		let mut order: Vec<_> = seen.into_iter().collect();
		order.sort_unstable();
		order
	}

	/// Structural equality of two subtrees: same kinds, same values, same shape
	pub fn same_tree(&self, a: NodeIndex, b: NodeIndex) -> bool {
		if a == b {
			return true;
		}
		match (self.node(a), self.node(b)) {
			(ArenaNode::Operand(x), ArenaNode::Operand(y)) => x == y,
			(
				ArenaNode::Operator {
					operator: op_a,
					left: left_a,
					right: right_a,
				},
				ArenaNode::Operator {
					operator: op_b,
					left: left_b,
					right: right_b,
				},
			) => {
				op_a == op_b
					&& self.same_tree(*left_a, *left_b)
					&& self.same_tree(*right_a, *right_b)
			}
			_ => false,
		}
	}

	/// Canonical text of a subtree. Operands print as-is and every operator
	/// application is wrapped in one pair of parentheses.
	pub fn render(&self, root: NodeIndex) -> String {
		let mut out = String::new();
		self.render_into(root, &mut out);
		out
	}

	fn render_into(&self, index: NodeIndex, out: &mut String) {
		match self.node(index) {
			ArenaNode::Operand(value) => out.push_str(value),
			ArenaNode::Operator {
				operator,
				left,
				right,
			} => {
				out.push('(');
				self.render_into(*left, out);
				out.push(' ');
				out.push_str(operator.symbol());
				out.push(' ');
				self.render_into(*right, out);
				out.push(')');
			}
		}
	}

	/// Copies a subtree out into the nested shape the evaluator walks
	pub fn to_resolved(&self, root: NodeIndex) -> ResolvedNode {
		match self.node(root) {
			ArenaNode::Operand(value) => ResolvedNode::operand(value.clone()),
			ArenaNode::Operator {
				operator,
				left,
				right,
			} => ResolvedNode::operator(
				*operator,
				self.to_resolved(*left),
				self.to_resolved(*right),
			),
		}
	}
}
