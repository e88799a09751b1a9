//! Node store implementations.
//!
//! This module provides the trait rule trees are persisted through and the
//! implementations shipped with the engine:
//!
//! - InMemory: Nodes kept in a shared map, lost when the process exits
//! - File: One JSON file per node inside a storage directory

mod error;
mod file;
mod node;

pub use error::RepositoryError;
pub use file::FileNodeStore;
pub use node::{InMemoryNodeStore, NodeStore};
