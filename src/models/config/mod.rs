//! Configuration loading and validation.
//!
//! This module provides the trait and implementation for loading and validating
//! the engine configuration file.

#![allow(clippy::result_large_err)]

use async_trait::async_trait;
use std::path::Path;

mod engine_config;
mod error;

pub use engine_config::{EngineConfig, StoreConfig};
pub use error::ConfigError;

/// Common interface for loading configuration files
#[async_trait]
pub trait ConfigLoader: Sized {
	/// Load configuration from a specific file path
	async fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	/// Validate the configuration
	///
	/// Returns Ok(()) if valid, or an error describing the first problem found.
	fn validate(&self) -> Result<(), ConfigError>;

	/// Check if a file is a JSON file based on extension
	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}
}
