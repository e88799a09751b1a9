//! Engine configuration loading and validation.
//!
//! The engine configuration only selects where rule nodes are kept:
//!
//! ```json
//! { "store": { "type": "file", "path": "data/nodes" } }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path, path::PathBuf};

use crate::models::{config::error::ConfigError, ConfigLoader};

/// Node store backing the rule service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
	/// Nodes live in process memory and vanish on exit
	Memory,
	/// One JSON file per node under `path`
	File { path: PathBuf },
}

impl Default for StoreConfig {
	fn default() -> Self {
		StoreConfig::File {
			path: PathBuf::from("data/nodes"),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
	#[serde(default)]
	pub store: StoreConfig,
}

impl EngineConfig {
	/// Replaces the configured store with a file store rooted at `path`
	pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.store = StoreConfig::File { path: path.into() };
		self
	}
}

#[async_trait]
impl ConfigLoader for EngineConfig {
	async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let metadata = HashMap::from([("path".to_string(), path.display().to_string())]);

		if !Self::is_json_file(path) {
			return Err(ConfigError::validation_error(
				"engine config must be a .json file",
				None,
				Some(metadata),
			));
		}

		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			ConfigError::file_error(
				format!("failed to read engine config: {}", e),
				Some(Box::new(e)),
				Some(metadata.clone()),
			)
		})?;
		let config: EngineConfig = serde_json::from_str(&content).map_err(|e| {
			ConfigError::parse_error(
				format!("failed to parse engine config: {}", e),
				Some(Box::new(e)),
				Some(metadata.clone()),
			)
		})?;

		config.validate()?;

		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if let StoreConfig::File { path } = &self.store {
			if path.as_os_str().is_empty() {
				return Err(ConfigError::validation_error(
					"file store path must not be empty",
					None,
					None,
				));
			}
			if path.is_file() {
				return Err(ConfigError::validation_error(
					"file store path points to a file, expected a directory",
					None,
					Some(HashMap::from([(
						"store_path".to_string(),
						path.display().to_string(),
					)])),
				));
			}
		}
		Ok(())
	}
}
