//! GraphQL API exposure for the framework
//!
//! This module provides GraphQL-specific routing and request marshalling.
//! It is completely separate from the dispatch core: the HTTP layer parses
//! inbound query text into execution requests, hands them to the host's
//! dispatcher and renders the standard response envelope.

pub mod request;
pub mod sdl;

use crate::dispatch::{ExecutionRequest, ExecutionResponse};
use crate::schema::OperationKind;
use crate::server::host::ServerHost;
use anyhow::Result;
use futures::future::join_all;
use axum::{
    Json, Router,
    extract::Extension,
    response::IntoResponse,
    routing::{get, post},
};
use sdl::SdlExporter;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// The standard GraphQL-over-HTTP request body.
#[derive(Debug, Deserialize)]
struct GraphQLRequestBody {
    query: String,
    variables: Option<HashMap<String, Value>>,
    #[serde(rename = "operationName")]
    #[allow(dead_code)]
    operation_name: Option<String>,
}

/// GraphQL API exposure implementation
///
/// Consumes a `ServerHost` and produces an Axum router; the host stays
/// transport-agnostic.
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router from a host.
    ///
    /// # Returns
    ///
    /// A router with:
    /// - `POST /graphql`: query/mutation endpoint
    /// - `GET /graphql/schema`: SDL export
    pub fn build_router(host: Arc<ServerHost>) -> Result<Router> {
        let router = Router::new()
            .route("/graphql", post(graphql_handler))
            .route("/graphql/schema", get(graphql_schema))
            .layer(Extension(host))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        Ok(router)
    }
}

/// Handler for GraphQL queries and mutations.
///
/// Each top-level field dispatches independently; successful fields merge
/// under `data` and failed ones contribute entries to `errors`. The HTTP
/// status is always 200, per the usual GraphQL-over-HTTP convention.
async fn graphql_handler(
    Extension(host): Extension<Arc<ServerHost>>,
    Json(body): Json<GraphQLRequestBody>,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4();
    let variables = body.variables.unwrap_or_default();

    let (kind, fields) = match request::parse_document(&body.query, &variables) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(%request_id, error = %err, "Rejected malformed request");
            return Json(json!({
                "errors": [crate::dispatch::ErrorDescriptor::from(&err)]
            }));
        }
    };

    tracing::debug!(%request_id, kind = %kind, fields = fields.len(), "Executing request");

    // Query fields are independent and execute concurrently; mutation
    // fields run serially in document order.
    let outcomes: Vec<(String, ExecutionResponse)> = match kind {
        OperationKind::Query => {
            join_all(fields.into_iter().map(|field| {
                let dispatcher = host.dispatcher.clone();
                async move {
                    let operation = field.operation.clone();
                    let response = dispatcher
                        .execute(
                            ExecutionRequest::new(kind, field.operation)
                                .with_arguments(field.arguments)
                                .with_selection(field.selection),
                        )
                        .await;
                    (operation, response)
                }
            }))
            .await
        }
        OperationKind::Mutation => {
            let mut outcomes = Vec::with_capacity(fields.len());
            for field in fields {
                let operation = field.operation.clone();
                let response = host
                    .dispatcher
                    .execute(
                        ExecutionRequest::new(kind, field.operation)
                            .with_arguments(field.arguments)
                            .with_selection(field.selection),
                    )
                    .await;
                outcomes.push((operation, response));
            }
            outcomes
        }
    };

    let mut data = Map::new();
    let mut errors = Vec::new();
    for (operation, response) in outcomes {
        if response.is_success() {
            data.insert(operation, response.data.unwrap_or(Value::Null));
        } else {
            errors.extend(response.errors);
        }
    }

    let mut envelope = Map::new();
    if !data.is_empty() || errors.is_empty() {
        envelope.insert("data".to_string(), Value::Object(data));
    }
    if !errors.is_empty() {
        envelope.insert(
            "errors".to_string(),
            serde_json::to_value(errors).unwrap_or(Value::Null),
        );
    }
    Json(Value::Object(envelope))
}

/// Handler for the SDL export endpoint.
async fn graphql_schema(Extension(host): Extension<Arc<ServerHost>>) -> impl IntoResponse {
    let sdl = SdlExporter::new(&host.registry).generate_sdl();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; charset=utf-8",
        )],
        sdl,
    )
}
