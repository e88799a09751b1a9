//! Rule service implementation.
//!
//! Ties the tokenizer, tree builder, optimizer and evaluator to a node store.
//! Every parsed rule is persisted node by node; combined trees reuse the nodes of
//! the rules they were built from.

use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use tracing::{info, instrument};

use super::{
	arena::{NodeIndex, RuleArena},
	builder::build_tree,
	error::RuleError,
	evaluation,
	optimizer::combine_all,
	persistence::{self, persist_tree, StoredIds},
	tokenizer::tokenize,
};
use crate::{
	models::{NodeId, ResolvedNode},
	repositories::NodeStore,
};

/// Operations offered on rules
///
/// Implemented by [`RuleService`] for any node store.
#[async_trait]
pub trait RuleServiceTrait: Send + Sync {
	/// Parses a rule string and stores its tree
	///
	/// # Arguments
	/// * `rule` - Rule text such as `age > 18 AND city = 'Paris'`
	///
	/// # Returns
	/// * `Result<NodeId, RuleError>` - Identifier of the stored root node
	///
	/// # Errors
	/// - Returns `RuleError::Tokenize` or `RuleError::Build` for malformed rules
	/// - Returns `RuleError::Repository` if a node cannot be written
	async fn parse(&self, rule: &str) -> Result<NodeId, RuleError>;

	/// Parses several rules and stores the tree combining all of them
	///
	/// # Arguments
	/// * `rules` - Rule texts, combined left to right
	///
	/// # Returns
	/// * `Result<NodeId, RuleError>` - Identifier of the combined root node
	///
	/// # Errors
	/// - Returns `RuleError::Build` if `rules` is empty, a rule is malformed or
	///   the combined tree is too deep
	/// - Returns `RuleError::Tokenize` or `RuleError::Repository` as [`Self::parse`] does
	async fn combine(&self, rules: &[String]) -> Result<NodeId, RuleError>;

	/// Evaluates a resolved tree against a data record
	///
	/// # Arguments
	/// * `tree` - Tree with every child inlined
	/// * `record` - JSON object whose fields the operands name
	///
	/// # Returns
	/// * `Result<Value, RuleError>` - The value of the root node
	fn evaluate(&self, tree: &ResolvedNode, record: &Value) -> Result<Value, RuleError>;

	/// Reconstructs the expression of a stored tree
	async fn stringify(&self, root: &NodeId) -> Result<String, RuleError>;

	/// Loads a stored tree with its children inlined
	async fn dereference(&self, root: &NodeId) -> Result<ResolvedNode, RuleError>;

	/// Loads a stored tree and evaluates it against a data record
	async fn evaluate_stored(&self, root: &NodeId, record: &Value) -> Result<Value, RuleError>;
}

/// A rule parsed into its own arena and already written to the store
struct ParsedRule {
	arena: RuleArena,
	root: NodeIndex,
	root_id: NodeId,
	stored: StoredIds,
}

/// Rule operations backed by a node store
pub struct RuleService<S: NodeStore> {
	store: S,
}

impl<S: NodeStore> RuleService<S> {
	/// Creates a new rule service
	///
	/// # Arguments
	/// * `store` - Store that receives every parsed and combined node
	///
	/// # Returns
	/// * `Self` - New rule service instance
	pub fn new(store: S) -> Self {
		Self { store }
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	async fn parse_and_store(&self, rule: &str) -> Result<ParsedRule, RuleError> {
		let tokens = tokenize(rule)?;
		let mut arena = RuleArena::new();
		let root = build_tree(&mut arena, &tokens)?;

		let mut stored = StoredIds::new();
		let root_id = persist_tree(&self.store, &arena, root, &mut stored).await?;

		Ok(ParsedRule {
			arena,
			root,
			root_id,
			stored,
		})
	}
}

#[async_trait]
impl<S: NodeStore> RuleServiceTrait for RuleService<S> {
	#[instrument(skip(self))]
	async fn parse(&self, rule: &str) -> Result<NodeId, RuleError> {
		let parsed = self.parse_and_store(rule).await?;
		info!(root = %parsed.root_id, nodes = parsed.stored.len(), "parsed rule");
		Ok(parsed.root_id)
	}

	#[instrument(skip(self, rules), fields(rule_count = rules.len()))]
	async fn combine(&self, rules: &[String]) -> Result<NodeId, RuleError> {
		let parsed = try_join_all(rules.iter().map(|rule| self.parse_and_store(rule))).await?;

		let mut arena = RuleArena::new();
		let mut stored = StoredIds::new();
		let mut roots = Vec::with_capacity(parsed.len());
		for rule in parsed {
			let translate = arena.absorb(rule.arena);
			roots.push(translate(rule.root));
			stored.extend(
				rule.stored
					.into_iter()
					.map(|(index, id)| (translate(index), id)),
			);
		}

		let root = combine_all(&mut arena, &roots)?;
		let root_id = persist_tree(&self.store, &arena, root, &mut stored).await?;
		info!(root = %root_id, "combined rules");
		Ok(root_id)
	}

	fn evaluate(&self, tree: &ResolvedNode, record: &Value) -> Result<Value, RuleError> {
		evaluation::evaluate(tree, record)
	}

	#[instrument(skip(self))]
	async fn stringify(&self, root: &NodeId) -> Result<String, RuleError> {
		persistence::stringify(&self.store, root).await
	}

	#[instrument(skip(self))]
	async fn dereference(&self, root: &NodeId) -> Result<ResolvedNode, RuleError> {
		persistence::dereference(&self.store, root).await
	}

	#[instrument(skip(self, record))]
	async fn evaluate_stored(&self, root: &NodeId, record: &Value) -> Result<Value, RuleError> {
		let tree = self.dereference(root).await?;
		let result = self.evaluate(&tree, record)?;
		info!(root = %root, result = %result, "evaluated rule");
		Ok(result)
	}
}
