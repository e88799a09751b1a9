//! Property-based tests for combining rule trees.

use crate::properties::strategies::{flat_rule_strategy, numeric_comparison_strategy};
use proptest::{prelude::*, test_runner::Config};
use rule_engine::services::rule::{
	build_tree, combine_all, evaluate, tokenize, NodeIndex, RuleArena,
};
use serde_json::{Map, Value};
use std::collections::HashSet;

fn parse_into(arena: &mut RuleArena, rule: &str) -> NodeIndex {
	build_tree(arena, &tokenize(rule).unwrap()).unwrap()
}

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn combining_copies_of_one_rule_returns_the_first(
		rule in flat_rule_strategy(),
		copies in 1usize..5,
	) {
		let mut arena = RuleArena::new();
		let roots: Vec<_> = (0..copies).map(|_| parse_into(&mut arena, &rule)).collect();
		let before = arena.len();

		prop_assert_eq!(combine_all(&mut arena, &roots), Ok(roots[0]));
		prop_assert_eq!(arena.len(), before);
	}

	// Comparisons on distinct fields never simplify, so combining them is a
	// plain conjunction
	#[test]
	fn combining_distinct_comparisons_is_conjunction(
		comparisons in prop::collection::vec(numeric_comparison_strategy(), 1..6),
		values in prop::collection::vec(-1000i64..1000, 6),
	) {
		let mut fields = HashSet::new();
		prop_assume!(comparisons.iter().all(|(field, _, _)| fields.insert(field.clone())));

		let mut arena = RuleArena::new();
		let roots: Vec<_> = comparisons
			.iter()
			.map(|(field, operator, literal)| {
				parse_into(&mut arena, &format!("{} {} {}", field, operator, literal))
			})
			.collect();
		let before = arena.len();
		let combined = combine_all(&mut arena, &roots).unwrap();
		prop_assert_eq!(arena.len(), before + roots.len() - 1);

		let record: Map<String, Value> = comparisons
			.iter()
			.zip(values.iter())
			.map(|((field, _, _), value)| (field.clone(), Value::from(*value)))
			.collect();
		let record = Value::Object(record);

		let expected = roots.iter().all(|root| {
			evaluate(&arena.to_resolved(*root), &record).unwrap() == Value::Bool(true)
		});
		prop_assert_eq!(
			evaluate(&arena.to_resolved(combined), &record).unwrap(),
			Value::Bool(expected)
		);
	}
}
