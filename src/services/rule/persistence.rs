//! Moving rule trees between an arena and a node store.
//!
//! Writing walks the arena in index order, which creates every child before its
//! parent. Reading walks the stored tree depth-first, left subtree before right,
//! fetching one node per round trip.

use futures::future::{BoxFuture, FutureExt};
use std::collections::HashMap;
use tracing::debug;

use super::{
	arena::{ArenaNode, NodeIndex, RuleArena},
	error::RuleError,
};
use crate::{
	models::{Node, NodeBody, NodeId, ResolvedNode},
	repositories::NodeStore,
};

/// Node identifiers already assigned to arena nodes
pub type StoredIds = HashMap<NodeIndex, NodeId>;

/// Persists every node reachable from `root` that has no identifier in `stored`
/// yet.
///
/// A subtree referenced from several parents is stored once and shared.
///
/// # Arguments
/// * `store` - Store receiving the new nodes
/// * `arena` - Arena holding the tree
/// * `root` - Root of the tree to persist
/// * `stored` - Identifiers of arena nodes already in the store; new ones are added
///
/// # Returns
/// * `Result<NodeId, RuleError>` - Identifier of `root`
pub async fn persist_tree<S: NodeStore>(
	store: &S,
	arena: &RuleArena,
	root: NodeIndex,
	stored: &mut StoredIds,
) -> Result<NodeId, RuleError> {
	let mut created = 0usize;
	for index in arena.reachable_from(root) {
		if stored.contains_key(&index) {
			continue;
		}
		let body = match arena.node(index) {
			ArenaNode::Operand(value) => NodeBody::operand(value.clone()),
			ArenaNode::Operator {
				operator,
				left,
				right,
			} => NodeBody::operator(
				*operator,
				stored_id(stored, *left)?,
				stored_id(stored, *right)?,
			),
		};
		let id = store.create(body).await?;
		stored.insert(index, id);
		created += 1;
	}
	debug!(created, "persisted rule tree");

	stored_id(stored, root)
}

fn stored_id(stored: &StoredIds, index: NodeIndex) -> Result<NodeId, RuleError> {
	stored.get(&index).cloned().ok_or_else(|| {
		RuleError::invalid_input(
			format!("node {} was referenced before it was stored", index.as_usize()),
			None,
			None,
		)
	})
}

/// Fetches a node, treating absence as an error
pub async fn fetch_node<S: NodeStore>(store: &S, id: &NodeId) -> Result<Node, RuleError> {
	store
		.fetch_by_id(id)
		.await?
		.ok_or_else(|| RuleError::node_not_found(id.to_string(), None, None))
}

/// Renders a stored tree as a fully parenthesized expression
pub fn stringify<'a, S: NodeStore>(
	store: &'a S,
	id: &'a NodeId,
) -> BoxFuture<'a, Result<String, RuleError>> {
	async move {
		let node = fetch_node(store, id).await?;
		match node.body {
			NodeBody::Operand { value } => Ok(value),
			NodeBody::Operator { value, left, right } => {
				let left = stringify(store, &left).await?;
				let right = stringify(store, &right).await?;
				Ok(format!("({} {} {})", left, value, right))
			}
		}
	}
	.boxed()
}

/// Loads a stored tree with every child inlined, ready for evaluation
pub fn dereference<'a, S: NodeStore>(
	store: &'a S,
	id: &'a NodeId,
) -> BoxFuture<'a, Result<ResolvedNode, RuleError>> {
	async move {
		let node = fetch_node(store, id).await?;
		let resolved = match node.body {
			NodeBody::Operand { value } => ResolvedNode::operand(value),
			NodeBody::Operator { value, left, right } => {
				let left = dereference(store, &left).await?;
				let right = dereference(store, &right).await?;
				ResolvedNode::operator(value, left, right)
			}
		};
		Ok(resolved.with_id(node.id))
	}
	.boxed()
}
