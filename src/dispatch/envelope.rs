//! Request and response envelopes
//!
//! The inbound shape is `{operationKind, operationName, arguments,
//! selection}`; the outbound shape is `{data}` or `{errors}` with the
//! conventional error descriptor (`message`, `path`, `extensions`), so any
//! standard-compliant client library can consume responses unmodified.

use crate::core::error::RefractError;
use crate::schema::descriptor::OperationKind;
use crate::shape::SelectionSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One operation to execute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Query or Mutation namespace
    #[serde(rename = "operationKind")]
    pub kind: OperationKind,

    /// Operation name (non-empty)
    #[serde(rename = "operationName")]
    pub operation: String,

    /// Argument payload; an arbitrary nested mapping, possibly empty
    #[serde(default)]
    pub arguments: Value,

    /// Requested fields of the operation's return type
    #[serde(default)]
    pub selection: SelectionSet,
}

impl ExecutionRequest {
    /// Build a query request.
    pub fn query(operation: impl Into<String>) -> Self {
        Self::new(OperationKind::Query, operation)
    }

    /// Build a mutation request.
    pub fn mutation(operation: impl Into<String>) -> Self {
        Self::new(OperationKind::Mutation, operation)
    }

    pub fn new(kind: OperationKind, operation: impl Into<String>) -> Self {
        Self {
            kind,
            operation: operation.into(),
            arguments: Value::Null,
            selection: SelectionSet::default(),
        }
    }

    pub fn with_arguments(mut self, arguments: Value) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_selection(mut self, selection: impl Into<SelectionSet>) -> Self {
        self.selection = selection.into();
        self
    }
}

/// The wire error envelope entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub message: String,

    /// Path of the field or argument the error points at
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,

    /// Machine-readable extensions; always carries a `code` entry
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
}

impl From<&RefractError> for ErrorDescriptor {
    fn from(err: &RefractError) -> Self {
        let mut extensions = Map::new();
        extensions.insert("code".to_string(), Value::String(err.error_code().to_string()));
        Self {
            message: err.to_string(),
            path: err.path(),
            extensions,
        }
    }
}

/// The outcome of executing one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDescriptor>,
}

impl ExecutionResponse {
    pub fn success(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn failure(err: &RefractError) -> Self {
        Self {
            data: None,
            errors: vec![ErrorDescriptor::from(err)],
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DispatchError;
    use crate::core::value::ValueKind;
    use serde_json::json;

    #[test]
    fn test_request_deserializes_from_wire_shape() {
        let request: ExecutionRequest = serde_json::from_value(json!({
            "operationKind": "query",
            "operationName": "task",
            "arguments": {"id": "1"},
            "selection": ["id"],
        }))
        .expect("should parse");

        assert_eq!(request.kind, OperationKind::Query);
        assert_eq!(request.operation, "task");
        assert_eq!(request.arguments, json!({"id": "1"}));
        assert_eq!(request.selection.0.len(), 1);
    }

    #[test]
    fn test_request_arguments_and_selection_default() {
        let request: ExecutionRequest = serde_json::from_value(json!({
            "operationKind": "mutation",
            "operationName": "submitData",
        }))
        .expect("should parse");

        assert!(request.arguments.is_null());
        assert!(request.selection.is_empty());
    }

    #[test]
    fn test_success_response_omits_errors() {
        let response = ExecutionResponse::success(json!({"id": "1"}));
        assert!(response.is_success());

        let wire = serde_json::to_value(&response).expect("should serialize");
        assert_eq!(wire, json!({"data": {"id": "1"}}));
    }

    #[test]
    fn test_failure_response_carries_code_and_path() {
        let err: RefractError = DispatchError::InvalidArgument {
            path: vec!["data".to_string()],
            expected: "[ItemTypeM]".to_string(),
            actual: ValueKind::String,
        }
        .into();
        let response = ExecutionResponse::failure(&err);
        assert!(!response.is_success());

        let wire = serde_json::to_value(&response).expect("should serialize");
        assert!(wire.get("data").is_none());
        assert_eq!(wire["errors"][0]["extensions"]["code"], "INVALID_ARGUMENT");
        assert_eq!(wire["errors"][0]["path"], json!(["data"]));
    }
}
