//! File-based node store.
//!
//! Each node is written to its own JSON file named `{node_id}.json` inside the
//! storage directory. Files are written once and never rewritten, matching the
//! immutability of rule nodes.

use async_trait::async_trait;
use std::{collections::HashMap, path::PathBuf};

use crate::{
	models::{Node, NodeBody, NodeId},
	repositories::{error::RepositoryError, node::NodeStore},
};

/// File-based implementation of the node store
#[derive(Clone)]
pub struct FileNodeStore {
	/// Directory holding one file per node
	storage_path: PathBuf,
}

impl FileNodeStore {
	pub fn new(storage_path: PathBuf) -> Self {
		FileNodeStore { storage_path }
	}

	fn node_path(&self, id: &NodeId) -> PathBuf {
		self.storage_path.join(format!("{}.json", id))
	}
}

impl Default for FileNodeStore {
	/// Stores nodes under "data/nodes"
	fn default() -> Self {
		FileNodeStore::new(PathBuf::from("data/nodes"))
	}
}

#[async_trait]
impl NodeStore for FileNodeStore {
	async fn create(&self, body: NodeBody) -> Result<NodeId, RepositoryError> {
		let node = Node::new(NodeId::generate(), body);
		let metadata = HashMap::from([("node_id".to_string(), node.id.to_string())]);

		tokio::fs::create_dir_all(&self.storage_path)
			.await
			.map_err(|e| {
				RepositoryError::internal_error(
					format!("Failed to create node directory: {}", e),
					Some(Box::new(e)),
					Some(HashMap::from([(
						"path".to_string(),
						self.storage_path.display().to_string(),
					)])),
				)
			})?;

		let json = serde_json::to_string(&node).map_err(|e| {
			RepositoryError::internal_error(
				format!("Failed to serialize node: {}", e),
				Some(Box::new(e)),
				Some(metadata.clone()),
			)
		})?;
		tokio::fs::write(self.node_path(&node.id), json)
			.await
			.map_err(|e| {
				RepositoryError::internal_error(
					format!("Failed to save node: {}", e),
					Some(Box::new(e)),
					Some(metadata.clone()),
				)
			})?;

		Ok(node.id)
	}

	async fn fetch_by_id(&self, id: &NodeId) -> Result<Option<Node>, RepositoryError> {
		let file_path = self.node_path(id);
		if !file_path.exists() {
			return Ok(None);
		}

		let metadata = HashMap::from([("node_id".to_string(), id.to_string())]);
		let content = tokio::fs::read_to_string(&file_path).await.map_err(|e| {
			RepositoryError::load_error(
				format!("Failed to read node: {}", e),
				Some(Box::new(e)),
				Some(metadata.clone()),
			)
		})?;
		let node: Node = serde_json::from_str(&content).map_err(|e| {
			RepositoryError::load_error(
				format!("Failed to parse node: {}", e),
				Some(Box::new(e)),
				Some(metadata.clone()),
			)
		})?;

		Ok(Some(node))
	}
}
