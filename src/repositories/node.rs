//! Node store interface and in-memory implementation.
//!
//! Rule trees are persisted one node at a time. A store assigns an identifier on
//! creation and hands nodes back by identifier; nothing else is required of it.

#![allow(clippy::result_large_err)]

use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use crate::{
	models::{Node, NodeBody, NodeId},
	repositories::error::RepositoryError,
};

/// Interface for node store implementations
///
/// Every call is independent; the rule service never needs a transaction
/// spanning several nodes.
#[async_trait]
pub trait NodeStore: Clone + Send + Sync {
	/// Stores a new node and returns its freshly assigned identifier
	async fn create(&self, body: NodeBody) -> Result<NodeId, RepositoryError>;

	/// Fetches a node by identifier
	///
	/// Returns `Ok(None)` when no node with this identifier exists.
	async fn fetch_by_id(&self, id: &NodeId) -> Result<Option<Node>, RepositoryError>;
}

/// Node store that keeps every node in process memory
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryNodeStore {
	nodes: Arc<RwLock<HashMap<NodeId, Node>>>,
}

impl InMemoryNodeStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of nodes created so far
	pub async fn len(&self) -> usize {
		self.nodes.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.nodes.read().await.is_empty()
	}
}

#[async_trait]
impl NodeStore for InMemoryNodeStore {
	async fn create(&self, body: NodeBody) -> Result<NodeId, RepositoryError> {
		let id = NodeId::generate();
		self.nodes
			.write()
			.await
			.insert(id.clone(), Node::new(id.clone(), body));
		Ok(id)
	}

	async fn fetch_by_id(&self, id: &NodeId) -> Result<Option<Node>, RepositoryError> {
		Ok(self.nodes.read().await.get(id).cloned())
	}
}
