//! Task metadata API demo
//!
//! A small product-metadata service: a task carries item types, each item
//! type has a description, a base type and a current value. The fixtures
//! are static JSON standing in for a real data source; the resolvers join
//! them the way a real backend would.
//!
//! - POST /graphql          - query/mutation endpoint
//! - GET  /graphql/schema   - SDL export

use refract::prelude::*;

const TASK: &str = r#"{
    "id": 1,
    "itemTypes": [{ "id": "otherInformation", "variantId": "uk", "order": 1 }]
}"#;

const ITEM_TYPES: &str = r#"{
    "otherInformation": {
        "description": "Other Information",
        "baseType": "ItemMemo"
    }
}"#;

const PRODUCT_VERSION_DATA: &str = r#"{
    "otherInformation": {
        "value": "it's a little fish that can be found in Hawaii"
    }
}"#;

const SCHEMA: &str = r#"
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
      - name: description
        type: String
      - name: baseType
        type: String
      - name: value
        type: ValueType!
  - name: ValueType
    fields:
      - name: value
        type: String!
  - name: ItemTypeM
    fields:
      - name: itemTypeId
        type: String
      - name: baseType
        type: String
      - name: value
        type: ValueTypeM
  - name: ValueTypeM
    fields:
      - name: value
        type: "[String!]"
operations:
  - name: task
    kind: query
    returns: Task
  - name: submitData
    kind: mutation
    returns: Task
    arguments:
      - name: data
        type: "[ItemTypeM]"
        required: true
"#;

/// Join the task fixture with item type metadata and current values.
async fn resolve_task(_arguments: Value) -> Result<Value> {
    let task: Value = serde_json::from_str(TASK)?;
    let item_types: Value = serde_json::from_str(ITEM_TYPES)?;
    let versions: Value = serde_json::from_str(PRODUCT_VERSION_DATA)?;

    let mut items = Vec::new();
    if let Some(map) = item_types.as_object() {
        for (item_type_id, meta) in map {
            items.push(json!({
                "itemTypeId": item_type_id,
                "description": meta["description"],
                "baseType": meta["baseType"],
                "value": { "value": versions[item_type_id]["value"] },
            }));
        }
    }

    Ok(json!({ "id": task["id"], "itemTypes": items }))
}

/// Accept submitted item type data and echo the stored task shape.
async fn resolve_submit_data(arguments: Value) -> Result<Value> {
    let submitted = arguments["data"].as_array().map(Vec::len).unwrap_or(0);
    tracing::info!(submitted, "Accepted submitted item types");

    Ok(json!({
        "id": "1",
        "itemTypes": [{ "itemTypeId": "Product", "baseType": "ItemTypeMemo" }]
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = SchemaConfig::from_yaml_str(SCHEMA)?;
    let registry = SchemaBuilder::new()
        .load_config(&config)?
        .bind_query("task", FnResolver::new(resolve_task))?
        .bind_mutation("submitData", FnResolver::new(resolve_submit_data))?
        .build()?;

    println!(
        "📦 Schema ready: {} types, {} operations",
        registry.type_count(),
        registry.operation_count()
    );

    let host = Arc::new(ServerHost::new(registry));
    let app = GraphQLExposure::build_router(host)?;

    println!("\n🌐 Server running on http://127.0.0.1:3000");
    println!("\n📚 Available endpoints:");
    println!("    POST   /graphql            - GraphQL endpoint");
    println!("    GET    /graphql/schema     - SDL export");
    println!("\n💡 Try:");
    println!(
        "    curl -s -X POST http://127.0.0.1:3000/graphql \\\n      -H 'content-type: application/json' \\\n      -d '{{\"query\": \"{{ task {{ id itemTypes {{ itemTypeId value {{ value }} }} }} }}\"}}'"
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("Server listening on 127.0.0.1:3000");
    axum::serve(listener, app).await?;

    Ok(())
}
