//! Bootstrap module for building the rule service.
//!
//! Reads the engine configuration, picks the node store it names and wraps it in
//! a [`RuleService`].
//!
//! Environment variables used:
//! - RULE_ENGINE_CONFIG: path of a JSON engine configuration; defaults apply when unset
//! - RULE_ENGINE_STORE_PATH: overrides the store with a file store at this directory

use async_trait::async_trait;
use std::{env, error::Error, path::PathBuf};
use tracing::info;

use crate::{
	models::{ConfigLoader, EngineConfig, Node, NodeBody, NodeId, StoreConfig},
	repositories::{FileNodeStore, InMemoryNodeStore, NodeStore, RepositoryError},
	services::rule::RuleService,
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Node store selected at runtime from the engine configuration
#[derive(Clone)]
pub enum ConfiguredNodeStore {
	Memory(InMemoryNodeStore),
	File(FileNodeStore),
}

impl From<&StoreConfig> for ConfiguredNodeStore {
	fn from(config: &StoreConfig) -> Self {
		match config {
			StoreConfig::Memory => ConfiguredNodeStore::Memory(InMemoryNodeStore::new()),
			StoreConfig::File { path } => {
				ConfiguredNodeStore::File(FileNodeStore::new(path.clone()))
			}
		}
	}
}

#[async_trait]
impl NodeStore for ConfiguredNodeStore {
	async fn create(&self, body: NodeBody) -> std::result::Result<NodeId, RepositoryError> {
		match self {
			ConfiguredNodeStore::Memory(store) => store.create(body).await,
			ConfiguredNodeStore::File(store) => store.create(body).await,
		}
	}

	async fn fetch_by_id(
		&self,
		id: &NodeId,
	) -> std::result::Result<Option<Node>, RepositoryError> {
		match self {
			ConfiguredNodeStore::Memory(store) => store.fetch_by_id(id).await,
			ConfiguredNodeStore::File(store) => store.fetch_by_id(id).await,
		}
	}
}

/// Loads the engine configuration named by the environment
///
/// # Errors
/// Returns an error if the configuration file cannot be read, parsed or validated
pub async fn load_engine_config() -> Result<EngineConfig> {
	let mut config = match env::var("RULE_ENGINE_CONFIG") {
		Ok(path) if !path.is_empty() => EngineConfig::load_from_path(&PathBuf::from(path)).await?,
		_ => EngineConfig::default(),
	};

	if let Ok(path) = env::var("RULE_ENGINE_STORE_PATH") {
		if !path.is_empty() {
			config = config.with_store_path(path);
			config.validate()?;
		}
	}

	Ok(config)
}

/// Builds the rule service for a configuration
pub fn initialize_service(config: &EngineConfig) -> RuleService<ConfiguredNodeStore> {
	match &config.store {
		StoreConfig::Memory => info!("Using in-memory node store"),
		StoreConfig::File { path } => info!(path = %path.display(), "Using file node store"),
	}
	RuleService::new(ConfiguredNodeStore::from(&config.store))
}
