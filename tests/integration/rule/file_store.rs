//! Rule service over the file node store.

use rule_engine::{
	models::NodeId,
	repositories::{FileNodeStore, RepositoryError},
	services::rule::{RuleError, RuleService, RuleServiceTrait},
};
use serde_json::json;
use tempfile::TempDir;

fn count_node_files(dir: &std::path::Path) -> usize {
	std::fs::read_dir(dir)
		.unwrap()
		.filter_map(|entry| entry.ok())
		.filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
		.count()
}

#[tokio::test]
async fn test_combined_rule_survives_restart() {
	let temp_dir = TempDir::new().unwrap();
	let storage = temp_dir.path().join("nodes");

	let root = {
		let service = RuleService::new(FileNodeStore::new(storage.clone()));
		let rules = vec![
			"age > 30 AND department = 'Sales'".to_string(),
			"salary > 50000".to_string(),
		];
		service.combine(&rules).await.unwrap()
	};

	// 7 nodes for the first rule, 3 for the second, 1 joining them
	assert_eq!(count_node_files(&storage), 11);

	let service = RuleService::new(FileNodeStore::new(storage));
	assert_eq!(
		service.stringify(&root).await.unwrap(),
		"(((age > 30) AND (department = 'Sales')) AND (salary > 50000))"
	);
	assert_eq!(
		service
			.evaluate_stored(
				&root,
				&json!({"age": 40, "department": "Sales", "salary": 60000})
			)
			.await
			.unwrap(),
		json!(true)
	);
}

#[tokio::test]
async fn test_node_files_hold_the_node_shape() {
	let temp_dir = TempDir::new().unwrap();
	let service = RuleService::new(FileNodeStore::new(temp_dir.path().to_path_buf()));
	let root = service.parse("city = 'New York'").await.unwrap();

	let content = std::fs::read_to_string(temp_dir.path().join(format!("{}.json", root))).unwrap();
	let node: serde_json::Value = serde_json::from_str(&content).unwrap();

	assert_eq!(node["id"], json!(root.as_str()));
	assert_eq!(node["type"], json!("operator"));
	assert_eq!(node["value"], json!("="));
	let right = node["right"].as_str().unwrap();

	let content = std::fs::read_to_string(temp_dir.path().join(format!("{}.json", right))).unwrap();
	let leaf: serde_json::Value = serde_json::from_str(&content).unwrap();
	assert_eq!(leaf["type"], json!("operand"));
	assert_eq!(leaf["value"], json!("'New York'"));
	assert!(leaf.get("left").is_none());
}

#[tokio::test]
async fn test_corrupt_node_file_is_a_store_error() {
	let temp_dir = TempDir::new().unwrap();
	let service = RuleService::new(FileNodeStore::new(temp_dir.path().to_path_buf()));
	let root = service.parse("a = 1").await.unwrap();

	std::fs::write(temp_dir.path().join(format!("{}.json", root)), "not a node").unwrap();

	let err = service.stringify(&root).await.unwrap_err();
	assert!(matches!(
		err,
		RuleError::Repository(RepositoryError::LoadError(_))
	));
}

#[tokio::test]
async fn test_unknown_root_identifier() {
	let temp_dir = TempDir::new().unwrap();
	let service = RuleService::new(FileNodeStore::new(temp_dir.path().to_path_buf()));

	let err = service
		.dereference(&NodeId::new("does-not-exist"))
		.await
		.unwrap_err();
	assert!(matches!(err, RuleError::NodeNotFound(_)));
}
