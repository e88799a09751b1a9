//! Rule parsing, combination, evaluation and rendering.
//!
//! - `tokenizer`: raw rule strings to tokens
//! - `builder`: tokens to trees in a [`RuleArena`]
//! - `optimizer`: folding several trees into one
//! - `evaluation`: resolved trees against data records
//! - `persistence`: writing trees to and reading them from a node store
//! - `service`: the [`RuleService`] tying these to a store

mod arena;
mod builder;
mod error;
mod evaluation;
mod optimizer;
mod persistence;
mod service;
mod tokenizer;

pub use arena::{ArenaNode, NodeIndex, RuleArena, MAX_TREE_DEPTH};
pub use builder::build_tree;
pub use error::{BuildError, RuleError, TokenizeError};
pub use evaluation::{apply_operator, evaluate, is_truthy, literal_value, to_number, to_text};
pub use optimizer::{combine, combine_all};
pub use persistence::{dereference, fetch_node, persist_tree, stringify, StoredIds};
pub use service::{RuleService, RuleServiceTrait};
pub use tokenizer::{is_operator, precedence, tokenize};
