//! Configuration loading tests
//!
//! YAML declarations feed the builder; resolvers bind by name; the result
//! is a frozen, validated registry.

use refract::prelude::*;
use std::io::Write as _;

const SCHEMA_YAML: &str = r#"
types:
  - name: Task
    fields:
      - name: id
        type: ID!
      - name: itemTypes
        type: "[ItemType]"
  - name: ItemType
    fields:
      - name: itemTypeId
        type: String
      - name: baseType
        type: String
operations:
  - name: task
    kind: query
    returns: Task
  - name: submitData
    kind: mutation
    returns: Task
    arguments:
      - name: data
        type: "[ItemType]"
        required: true
"#;

#[tokio::test]
async fn test_config_to_dispatch_pipeline() {
    let config = SchemaConfig::from_yaml_str(SCHEMA_YAML).expect("config should parse");
    let registry = SchemaBuilder::new()
        .load_config(&config)
        .expect("config should load")
        .bind_query(
            "task",
            FnResolver::new(|_args: Value| async {
                Ok(json!({"id": "1", "itemTypes": [{"itemTypeId": "a", "baseType": "b"}]}))
            }),
        )
        .expect("query should bind")
        .bind_mutation(
            "submitData",
            FnResolver::new(|_args: Value| async { Ok(json!({"id": "1"})) }),
        )
        .expect("mutation should bind")
        .build()
        .expect("schema should build");

    let dispatcher = Dispatcher::new(Arc::new(registry));

    let response = dispatcher
        .execute(
            ExecutionRequest::query("task").with_selection(SelectionSet::from([
                Selection::field("id"),
                Selection::with_nested("itemTypes", [Selection::field("itemTypeId")]),
            ])),
        )
        .await;
    assert!(response.is_success(), "errors: {:?}", response.errors);
    assert_eq!(
        response.data,
        Some(json!({"id": "1", "itemTypes": [{"itemTypeId": "a"}]}))
    );
}

#[tokio::test]
async fn test_config_declared_arguments_are_enforced() {
    let config = SchemaConfig::from_yaml_str(SCHEMA_YAML).expect("config should parse");
    let registry = SchemaBuilder::new()
        .load_config(&config)
        .expect("config should load")
        .bind_query(
            "task",
            FnResolver::new(|_args: Value| async { Ok(json!({"id": "1"})) }),
        )
        .expect("query should bind")
        .bind_mutation(
            "submitData",
            FnResolver::new(|_args: Value| async { Ok(json!({"id": "1"})) }),
        )
        .expect("mutation should bind")
        .build()
        .expect("schema should build");
    let dispatcher = Dispatcher::new(Arc::new(registry));

    let response = dispatcher
        .execute(ExecutionRequest::mutation("submitData"))
        .await;
    assert_eq!(
        response.errors[0].extensions["code"],
        json!("MISSING_ARGUMENT")
    );

    let response = dispatcher
        .execute(
            ExecutionRequest::mutation("submitData")
                .with_arguments(json!({"data": "not-a-list"})),
        )
        .await;
    assert_eq!(
        response.errors[0].extensions["code"],
        json!("INVALID_ARGUMENT")
    );
}

#[test]
fn test_config_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file should create");
    file.write_all(SCHEMA_YAML.as_bytes())
        .expect("write should succeed");

    let path = file.path().to_str().expect("path should be utf-8");
    let config = SchemaConfig::from_yaml_file(path).expect("config should load");
    assert_eq!(config.types.len(), 2);
    assert_eq!(config.operations.len(), 2);
}

#[test]
fn test_config_with_dangling_reference_fails_at_build() {
    let config = SchemaConfig::from_yaml_str(
        r#"
types:
  - name: Task
    fields:
      - name: owner
        type: User
operations: []
"#,
    )
    .expect("config should parse");

    let err = SchemaBuilder::new()
        .load_config(&config)
        .expect("config should load")
        .build()
        .expect_err("dangling reference should fail");
    assert_eq!(err.error_code(), "DANGLING_FIELD_TYPE");
}
