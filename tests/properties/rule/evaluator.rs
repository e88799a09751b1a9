//! Property-based tests for rule evaluation.
//! Parsing a rule and evaluating it must agree with applying its operators
//! directly to the record values.

use crate::properties::strategies::{
	field_name_strategy, logical_operator_strategy, numeric_comparison_strategy,
	quoted_text_strategy,
};
use proptest::{prelude::*, test_runner::Config};
use rule_engine::{
	models::{Operator, ResolvedNode},
	services::rule::{build_tree, evaluate, tokenize, RuleArena},
};
use serde_json::{json, Value};

fn parse_resolved(rule: &str) -> ResolvedNode {
	let tokens = tokenize(rule).unwrap();
	let mut arena = RuleArena::new();
	let root = build_tree(&mut arena, &tokens).unwrap();
	arena.to_resolved(root)
}

fn compare(operator: Operator, left: i64, right: i64) -> bool {
	match operator {
		Operator::Gt => left > right,
		Operator::Lt => left < right,
		Operator::Eq => left == right,
		Operator::And | Operator::Or => unreachable!("not a comparison"),
	}
}

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn comparison_matches_direct_application(
		(field, operator, literal) in numeric_comparison_strategy(),
		value in -1000i64..1000,
	) {
		let tree = parse_resolved(&format!("{} {} {}", field, operator, literal));
		let record = json!({ field: value });

		prop_assert_eq!(
			evaluate(&tree, &record).unwrap(),
			Value::Bool(compare(operator, value, literal))
		);
	}

	#[test]
	fn comparison_against_float_field(
		(field, operator, literal) in numeric_comparison_strategy(),
		value in -1000.0f64..1000.0,
	) {
		let tree = parse_resolved(&format!("{} {} {}", field, operator, literal));
		let record = json!({ field: value });

		let expected = match operator {
			Operator::Gt => value > literal as f64,
			Operator::Lt => value < literal as f64,
			_ => value == literal as f64,
		};
		prop_assert_eq!(evaluate(&tree, &record).unwrap(), Value::Bool(expected));
	}

	#[test]
	fn quoted_equality_matches_string_equality(
		field in field_name_strategy(),
		text in quoted_text_strategy(),
		other in quoted_text_strategy(),
		same in any::<bool>(),
	) {
		let tree = parse_resolved(&format!("{} = '{}'", field, text));
		let actual = if same { text.clone() } else { other };
		let record = json!({ field: actual.clone() });

		prop_assert_eq!(evaluate(&tree, &record).unwrap(), Value::Bool(actual == text));
	}

	#[test]
	fn logical_join_matches_direct_application(
		(left_field, left_op, left_literal) in numeric_comparison_strategy(),
		(right_field, right_op, right_literal) in numeric_comparison_strategy(),
		joiner in logical_operator_strategy(),
		left_value in -1000i64..1000,
		right_value in -1000i64..1000,
	) {
		prop_assume!(left_field != right_field);
		let rule = format!(
			"{} {} {} {} {} {} {}",
			left_field, left_op, left_literal, joiner, right_field, right_op, right_literal
		);
		let tree = parse_resolved(&rule);
		let record = json!({ left_field: left_value, right_field: right_value });

		let left = compare(left_op, left_value, left_literal);
		let right = compare(right_op, right_value, right_literal);
		let expected = match joiner {
			Operator::And => left && right,
			_ => left || right,
		};
		prop_assert_eq!(evaluate(&tree, &record).unwrap(), Value::Bool(expected));
	}

	#[test]
	fn missing_field_is_always_an_error(
		(field, operator, literal) in numeric_comparison_strategy(),
	) {
		let tree = parse_resolved(&format!("{} {} {}", field, operator, literal));
		let empty_record = json!({});
		prop_assert!(evaluate(&tree, &empty_record).is_err());
	}
}
