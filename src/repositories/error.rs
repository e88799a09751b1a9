//! Error types for node store operations.
//!
//! A missing node is not an error at this level: `fetch_by_id` returns `None` and
//! the rule service decides what that means. These variants cover stores that
//! fail to read or write.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;

/// Represents errors that can occur during node store operations
#[derive(ThisError, Debug)]
pub enum RepositoryError {
	/// A stored node could not be read or decoded
	#[error("Load error: {0}")]
	LoadError(ErrorContext),

	/// A node could not be written
	#[error("Internal error: {0}")]
	InternalError(ErrorContext),
}

impl RepositoryError {
	pub fn load_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::LoadError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn internal_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InternalError(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for RepositoryError {
	fn trace_id(&self) -> String {
		match self {
			Self::LoadError(ctx) | Self::InternalError(ctx) => ctx.trace_id.clone(),
		}
	}
}
