//! End-to-end tests of the rule service over the in-memory node store.

use rule_engine::{
	models::{NodeBody, Operator},
	repositories::{InMemoryNodeStore, NodeStore},
	services::rule::{BuildError, RuleError, RuleService, RuleServiceTrait},
	utils::tests::builders::resolved::ResolvedTreeBuilder,
};
use serde_json::json;

fn create_service() -> RuleService<InMemoryNodeStore> {
	RuleService::new(InMemoryNodeStore::new())
}

fn rules(rules: &[&str]) -> Vec<String> {
	rules.iter().map(|rule| rule.to_string()).collect()
}

#[tokio::test]
async fn test_parse_evaluate_and_stringify_employee_rule() {
	let service = create_service();
	let root = service
		.parse("((age > 30 AND department = 'Sales') OR (age < 25 AND department = 'Marketing')) AND (salary > 50000 OR experience > 5)")
		.await
		.unwrap();

	assert_eq!(
		service.stringify(&root).await.unwrap(),
		"((((age > 30) AND (department = 'Sales')) OR ((age < 25) AND (department = 'Marketing'))) AND ((salary > 50000) OR (experience > 5)))"
	);

	let eligible = json!({"age": 35, "department": "Sales", "salary": 60000, "experience": 3});
	let too_young = json!({"age": 28, "department": "Sales", "salary": 60000, "experience": 3});
	let marketing = json!({"age": 22, "department": "Marketing", "salary": 20000, "experience": 6});

	assert_eq!(
		service.evaluate_stored(&root, &eligible).await.unwrap(),
		json!(true)
	);
	assert_eq!(
		service.evaluate_stored(&root, &too_young).await.unwrap(),
		json!(false)
	);
	assert_eq!(
		service.evaluate_stored(&root, &marketing).await.unwrap(),
		json!(true)
	);
}

#[tokio::test]
async fn test_stringify_of_parsed_rule_is_fully_parenthesized() {
	let service = create_service();
	let root = service.parse("(a > 1) AND (b < 2)").await.unwrap();
	assert_eq!(
		service.stringify(&root).await.unwrap(),
		"((a > 1) AND (b < 2))"
	);

	let root = service.parse("active").await.unwrap();
	assert_eq!(service.stringify(&root).await.unwrap(), "active");
}

#[tokio::test]
async fn test_combine_identical_rules_deduplicates() {
	let service = create_service();
	let root = service.combine(&rules(&["a = 1", "a = 1"])).await.unwrap();

	let node = service.store().fetch_by_id(&root).await.unwrap().unwrap();
	assert!(matches!(
		node.body,
		NodeBody::Operator {
			value: Operator::Eq,
			..
		}
	));
	assert_eq!(service.stringify(&root).await.unwrap(), "(a = 1)");
}

#[tokio::test]
async fn test_combine_distinct_rules_conjoins_in_order() {
	let service = create_service();
	let root = service
		.combine(&rules(&["a = 1", "b = 2", "c > 3"]))
		.await
		.unwrap();

	assert_eq!(
		service.stringify(&root).await.unwrap(),
		"(((a = 1) AND (b = 2)) AND (c > 3))"
	);
	assert_eq!(
		service
			.evaluate_stored(&root, &json!({"a": 1, "b": 2, "c": 4}))
			.await
			.unwrap(),
		json!(true)
	);
	assert_eq!(
		service
			.evaluate_stored(&root, &json!({"a": 1, "b": 2, "c": 3}))
			.await
			.unwrap(),
		json!(false)
	);
}

#[tokio::test]
async fn test_combine_single_rule_returns_its_tree() {
	let service = create_service();
	let root = service.combine(&rules(&["x < 10"])).await.unwrap();
	assert_eq!(service.stringify(&root).await.unwrap(), "(x < 10)");
	assert_eq!(service.store().len().await, 3);
}

#[tokio::test]
async fn test_combine_absorbs_boolean_operand() {
	let service = create_service();
	let root = service
		.combine(&rules(&["(p) OR q", "true"]))
		.await
		.unwrap();
	assert_eq!(service.stringify(&root).await.unwrap(), "true");
}

#[tokio::test]
async fn test_combine_errors() {
	let service = create_service();
	assert!(matches!(
		service.combine(&[]).await,
		Err(RuleError::Build(BuildError::EmptyRuleSet))
	));
	assert!(matches!(
		service.combine(&rules(&["a = 1", ""])).await,
		Err(RuleError::Build(BuildError::EmptyExpression))
	));
}

#[tokio::test]
async fn test_dereference_returns_tree_with_identifiers() {
	let service = create_service();
	let root = service.parse("score > 10").await.unwrap();
	let tree = service.dereference(&root).await.unwrap();

	assert_eq!(tree.id.as_ref(), Some(&root));
	assert_eq!(tree.kind, "operator");
	assert_eq!(tree.value, json!(">"));
	assert_eq!(tree.left.as_ref().unwrap().value, json!("score"));
	assert_eq!(
		service.evaluate(&tree, &json!({"score": 11})).unwrap(),
		json!(true)
	);
}

#[tokio::test]
async fn test_evaluate_missing_field() {
	let service = create_service();
	let root = service.parse("salary > 1000").await.unwrap();
	let result = service.evaluate_stored(&root, &json!({"age": 30})).await;

	match result {
		Err(RuleError::FieldNotFound(ctx)) => {
			assert_eq!(ctx.message, "salary");
			assert!(ctx.metadata.unwrap().contains_key("node_id"));
		}
		other => panic!("Expected FieldNotFound, got {:?}", other),
	}
}

#[tokio::test]
async fn test_evaluate_caller_built_tree() {
	let service = create_service();
	let tree = ResolvedTreeBuilder::comparison("age", Operator::Gt, "30")
		.and(ResolvedTreeBuilder::operand("dept").join(
			Operator::Eq,
			ResolvedTreeBuilder::literal("Sales"),
		))
		.or(ResolvedTreeBuilder::comparison("vip", Operator::Eq, "true"))
		.build();

	assert_eq!(
		service
			.evaluate(&tree, &json!({"age": 31, "dept": "Sales", "vip": false}))
			.unwrap(),
		json!(true)
	);
	assert_eq!(
		service
			.evaluate(&tree, &json!({"age": 20, "dept": "Sales", "vip": true}))
			.unwrap(),
		json!(true)
	);
	assert_eq!(
		service
			.evaluate(&tree, &json!({"age": 20, "dept": "Sales", "vip": false}))
			.unwrap(),
		json!(false)
	);
}

#[tokio::test]
async fn test_evaluate_rejects_non_object_record() {
	let service = create_service();
	let tree = ResolvedTreeBuilder::comparison("a", Operator::Eq, "1").build();
	for record in [json!(null), json!("a"), json!([{"a": 1}])] {
		assert!(matches!(
			service.evaluate(&tree, &record),
			Err(RuleError::InvalidInput(_))
		));
	}
}

#[tokio::test]
async fn test_parse_keeps_operator_split_quirk() {
	let service = create_service();
	let err = service.parse("ORDER > 1").await.unwrap_err();
	assert!(matches!(err, RuleError::Build(_)));

	let root = service.parse("order > 1").await.unwrap();
	assert_eq!(service.stringify(&root).await.unwrap(), "(order > 1)");
}
