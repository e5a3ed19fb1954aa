//! HTTP-level tests for the GraphQL exposure
//!
//! Full round-trips: JSON body → query parsing → dispatch → shaping →
//! response envelope.

use axum_test::TestServer;
use refract::prelude::*;

fn make_host() -> Arc<ServerHost> {
    let registry = SchemaBuilder::new()
        .register_type(
            TypeDescriptor::new("Task")
                .with_field(FieldDescriptor::scalar("id", ScalarType::Id).non_null())
                .with_field(FieldDescriptor::list(
                    "itemTypes",
                    FieldKind::object("ItemType"),
                )),
        )
        .expect("Task should register")
        .register_type(
            TypeDescriptor::new("ItemType")
                .with_field(FieldDescriptor::scalar("itemTypeId", ScalarType::String))
                .with_field(FieldDescriptor::scalar("baseType", ScalarType::String)),
        )
        .expect("ItemType should register")
        .query(
            "task",
            "Task",
            vec![],
            FnResolver::new(|_args: Value| async {
                Ok(json!({
                    "id": 1,
                    "itemTypes": [{"itemTypeId": "otherInformation", "baseType": "ItemMemo"}]
                }))
            }),
        )
        .expect("query should register")
        .mutation(
            "submitData",
            "Task",
            vec![
                ArgumentDescriptor::new(
                    "data",
                    FieldKind::list_of(FieldKind::object("ItemType")),
                )
                .required(),
            ],
            FnResolver::new(|arguments: Value| async move {
                let count = arguments["data"].as_array().map(Vec::len).unwrap_or(0);
                Ok(json!({"id": count.to_string(), "itemTypes": []}))
            }),
        )
        .expect("mutation should register")
        .build()
        .expect("schema should build");

    Arc::new(ServerHost::new(registry))
}

fn make_server() -> TestServer {
    let router = GraphQLExposure::build_router(make_host()).expect("router should build");
    TestServer::try_new(router).expect("server should start")
}

#[tokio::test]
async fn test_query_round_trip() {
    let server = make_server();

    let response = server
        .post("/graphql")
        .json(&json!({"query": "{ task { id itemTypes { itemTypeId } } }"}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body["data"]["task"],
        json!({"id": 1, "itemTypes": [{"itemTypeId": "otherInformation"}]})
    );
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_mutation_with_variables() {
    let server = make_server();

    let response = server
        .post("/graphql")
        .json(&json!({
            "query": "mutation Submit($data: [ItemType]) { submitData(data: $data) { id } }",
            "variables": {"data": [{"itemTypeId": "Product"}, {"itemTypeId": "Memo"}]},
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["submitData"]["id"], "2");
}

#[tokio::test]
async fn test_unknown_operation_returns_error_envelope() {
    let server = make_server();

    let response = server
        .post("/graphql")
        .json(&json!({"query": "{ nonexistent { id } }"}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body["errors"][0]["extensions"]["code"],
        json!("UNKNOWN_OPERATION")
    );
}

#[tokio::test]
async fn test_parse_error_returns_errors_only() {
    let server = make_server();

    let response = server
        .post("/graphql")
        .json(&json!({"query": "not valid graphql {{{{"}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body.get("data").is_none());
    assert_eq!(
        body["errors"][0]["extensions"]["code"],
        json!("MALFORMED_QUERY")
    );
}

#[tokio::test]
async fn test_partial_success_across_top_level_fields() {
    let server = make_server();

    let response = server
        .post("/graphql")
        .json(&json!({"query": "{ task { id } nonexistent { id } }"}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["task"]["id"], 1);
    assert_eq!(
        body["errors"][0]["extensions"]["code"],
        json!("UNKNOWN_OPERATION")
    );
}

#[tokio::test]
async fn test_argument_shape_mismatch_reports_path() {
    let server = make_server();

    let response = server
        .post("/graphql")
        .json(&json!({
            "query": "mutation { submitData(data: \"oops\") { id } }",
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body["errors"][0]["extensions"]["code"],
        json!("INVALID_ARGUMENT")
    );
    assert_eq!(body["errors"][0]["path"], json!(["data"]));
}

#[tokio::test]
async fn test_schema_endpoint_exports_sdl() {
    let server = make_server();

    let response = server.get("/graphql/schema").await;
    response.assert_status_ok();

    let sdl = response.text();
    assert!(sdl.contains("type Task {"));
    assert!(sdl.contains("type Query {"));
    assert!(sdl.contains("submitData(data: [ItemType]!): Task"));
}

#[tokio::test]
async fn test_subscription_rejected_with_unsupported() {
    let server = make_server();

    let response = server
        .post("/graphql")
        .json(&json!({"query": "subscription { taskChanged { id } }"}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["errors"][0]["extensions"]["code"], json!("UNSUPPORTED"));
}
