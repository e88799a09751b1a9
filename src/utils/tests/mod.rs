//! Test helper utilities
//!
//! This module contains test helper utilities for the application.
//!
//! - `builders`: Test helper utilities for creating rule trees

pub mod builders {
	pub mod resolved;
}

pub use builders::*;
