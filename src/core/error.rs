//! Typed error handling for the refract framework
//!
//! This module provides the error type hierarchy for every phase of a
//! request: schema registration, dispatch, shaping, resolver execution and
//! cancellation. Clients can match specific categories instead of dealing
//! with generic `anyhow::Error` values.
//!
//! # Error Categories
//!
//! - [`RegistrationError`]: schema construction errors, fatal at startup
//! - [`DispatchError`]: operation lookup and argument validation errors
//! - [`ShapingError`]: field selection and nullability errors
//! - [`ResolverError`]: failures inside a bound resolver, wrapped at the
//!   dispatcher boundary
//! - `Cancelled`: the caller gave up before the resolver completed
//!
//! All errors are returned as values. Only registration and configuration
//! errors during startup are permitted to terminate the process.

use crate::config::ConfigError;
use crate::core::value::ValueKind;
use crate::schema::OperationKind;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the refract framework
#[derive(Debug)]
pub enum RefractError {
    /// Schema construction errors (fatal at startup)
    Registration(RegistrationError),

    /// Operation lookup and argument validation errors
    Dispatch(DispatchError),

    /// Field selection and nullability errors
    Shaping(ShapingError),

    /// Failures raised inside a bound resolver
    Resolver(ResolverError),

    /// The caller cancelled the request before the resolver completed
    Cancelled { operation: String },

    /// Configuration loading errors
    Config(ConfigError),

    /// Internal framework errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for RefractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefractError::Registration(e) => write!(f, "{}", e),
            RefractError::Dispatch(e) => write!(f, "{}", e),
            RefractError::Shaping(e) => write!(f, "{}", e),
            RefractError::Resolver(e) => write!(f, "{}", e),
            RefractError::Cancelled { operation } => {
                write!(f, "Operation '{}' was cancelled", operation)
            }
            RefractError::Config(e) => write!(f, "{}", e),
            RefractError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for RefractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RefractError::Registration(e) => Some(e),
            RefractError::Dispatch(e) => Some(e),
            RefractError::Shaping(e) => Some(e),
            RefractError::Resolver(e) => Some(e),
            RefractError::Cancelled { .. } => None,
            RefractError::Config(e) => Some(e),
            RefractError::Internal(_) => None,
        }
    }
}

/// Error response structure for plain HTTP surfaces
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RefractError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RefractError::Registration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RefractError::Dispatch(e) => e.status_code(),
            RefractError::Shaping(e) => e.status_code(),
            RefractError::Resolver(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RefractError::Cancelled { .. } => StatusCode::REQUEST_TIMEOUT,
            RefractError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RefractError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RefractError::Registration(e) => e.error_code(),
            RefractError::Dispatch(e) => e.error_code(),
            RefractError::Shaping(e) => e.error_code(),
            RefractError::Resolver(_) => "RESOLVER_FAILED",
            RefractError::Cancelled { .. } => "CANCELLED",
            RefractError::Config(_) => "CONFIG_ERROR",
            RefractError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The path of the field or argument this error points at, if any.
    ///
    /// Used to populate the `path` entry of the wire error envelope.
    pub fn path(&self) -> Vec<String> {
        match self {
            RefractError::Dispatch(DispatchError::InvalidArgument { path, .. }) => path.clone(),
            RefractError::Dispatch(DispatchError::MissingArgument { argument }) => {
                vec![argument.clone()]
            }
            RefractError::Shaping(ShapingError::UnknownField { field, .. }) => vec![field.clone()],
            RefractError::Shaping(ShapingError::NullabilityViolation { field, .. }) => {
                vec![field.clone()]
            }
            _ => Vec::new(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RefractError::Dispatch(DispatchError::InvalidArgument {
                path,
                expected,
                actual,
            }) => Some(serde_json::json!({
                "path": path,
                "expected": expected,
                "actual": actual.to_string(),
            })),
            RefractError::Dispatch(DispatchError::UnknownOperation { operation, kind }) => {
                Some(serde_json::json!({
                    "operation": operation,
                    "kind": kind.to_string(),
                }))
            }
            RefractError::Shaping(ShapingError::UnknownField { field, type_name }) => {
                Some(serde_json::json!({
                    "field": field,
                    "type": type_name,
                }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for RefractError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Registration Errors
// =============================================================================

/// Errors raised while building the schema registry
///
/// All of these are fatal: a process with a schema that fails validation
/// must not start serving.
#[derive(Debug)]
pub enum RegistrationError {
    /// A type with this name is already registered
    DuplicateType { type_name: String },

    /// An operation with this name already exists in the same namespace
    DuplicateOperation {
        operation: String,
        kind: OperationKind,
    },

    /// A type, field or operation name is not a valid identifier
    InvalidName { name: String, context: String },

    /// An object field references a type that was never registered
    DanglingFieldType {
        type_name: String,
        field: String,
        referenced: String,
    },

    /// An operation's return type was never registered
    UnknownReturnType {
        operation: String,
        kind: OperationKind,
        return_type: String,
    },

    /// An operation argument references a type that was never registered
    UnknownArgumentType {
        operation: String,
        argument: String,
        referenced: String,
    },

    /// An operation declared in configuration was never bound to a resolver
    UnboundOperation {
        operation: String,
        kind: OperationKind,
    },

    /// A resolver was bound to an operation that was never declared
    UndeclaredOperation {
        operation: String,
        kind: OperationKind,
    },
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::DuplicateType { type_name } => {
                write!(f, "Type '{}' is already registered", type_name)
            }
            RegistrationError::DuplicateOperation { operation, kind } => {
                write!(f, "{} '{}' is already registered", kind, operation)
            }
            RegistrationError::InvalidName { name, context } => {
                write!(f, "'{}' is not a valid name for {}", name, context)
            }
            RegistrationError::DanglingFieldType {
                type_name,
                field,
                referenced,
            } => {
                write!(
                    f,
                    "Field '{}.{}' references unregistered type '{}'",
                    type_name, field, referenced
                )
            }
            RegistrationError::UnknownReturnType {
                operation,
                kind,
                return_type,
            } => {
                write!(
                    f,
                    "{} '{}' returns unregistered type '{}'",
                    kind, operation, return_type
                )
            }
            RegistrationError::UnknownArgumentType {
                operation,
                argument,
                referenced,
            } => {
                write!(
                    f,
                    "Argument '{}' of operation '{}' references unregistered type '{}'",
                    argument, operation, referenced
                )
            }
            RegistrationError::UnboundOperation { operation, kind } => {
                write!(
                    f,
                    "{} '{}' is declared in configuration but has no resolver bound",
                    kind, operation
                )
            }
            RegistrationError::UndeclaredOperation { operation, kind } => {
                write!(
                    f,
                    "Cannot bind resolver: {} '{}' was never declared",
                    kind, operation
                )
            }
        }
    }
}

impl std::error::Error for RegistrationError {}

impl RegistrationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RegistrationError::DuplicateType { .. } => "DUPLICATE_TYPE",
            RegistrationError::DuplicateOperation { .. } => "DUPLICATE_OPERATION",
            RegistrationError::InvalidName { .. } => "INVALID_NAME",
            RegistrationError::DanglingFieldType { .. } => "DANGLING_FIELD_TYPE",
            RegistrationError::UnknownReturnType { .. } => "UNKNOWN_RETURN_TYPE",
            RegistrationError::UnknownArgumentType { .. } => "UNKNOWN_ARGUMENT_TYPE",
            RegistrationError::UnboundOperation { .. } => "UNBOUND_OPERATION",
            RegistrationError::UndeclaredOperation { .. } => "UNDECLARED_OPERATION",
        }
    }
}

impl From<RegistrationError> for RefractError {
    fn from(err: RegistrationError) -> Self {
        RefractError::Registration(err)
    }
}

// =============================================================================
// Dispatch Errors
// =============================================================================

/// Errors raised while locating an operation or validating its arguments
#[derive(Debug)]
pub enum DispatchError {
    /// No operation with this name exists in the requested namespace
    UnknownOperation {
        operation: String,
        kind: OperationKind,
    },

    /// The operation name was empty
    EmptyOperationName,

    /// No type with this name is registered
    UnknownType { type_name: String },

    /// A required argument was absent from the payload
    MissingArgument { argument: String },

    /// An argument value did not match its declared structural kind
    InvalidArgument {
        path: Vec<String>,
        expected: String,
        actual: ValueKind,
    },

    /// The inbound query text could not be parsed
    MalformedQuery { message: String },

    /// The inbound query uses a feature this dispatch layer does not support
    Unsupported { feature: String },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownOperation { operation, kind } => {
                write!(f, "Unknown {} '{}'", kind, operation)
            }
            DispatchError::EmptyOperationName => {
                write!(f, "Operation name must not be empty")
            }
            DispatchError::UnknownType { type_name } => {
                write!(f, "Unknown type '{}'", type_name)
            }
            DispatchError::MissingArgument { argument } => {
                write!(f, "Missing required argument '{}'", argument)
            }
            DispatchError::InvalidArgument {
                path,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid argument '{}': expected {}, got {}",
                    path.join("."),
                    expected,
                    actual
                )
            }
            DispatchError::MalformedQuery { message } => {
                write!(f, "Failed to parse query: {}", message)
            }
            DispatchError::Unsupported { feature } => {
                write!(f, "{} is not supported", feature)
            }
        }
    }
}

impl std::error::Error for DispatchError {}

impl DispatchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::UnknownOperation { .. } => StatusCode::NOT_FOUND,
            DispatchError::EmptyOperationName => StatusCode::BAD_REQUEST,
            DispatchError::UnknownType { .. } => StatusCode::BAD_REQUEST,
            DispatchError::MissingArgument { .. } => StatusCode::BAD_REQUEST,
            DispatchError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            DispatchError::MalformedQuery { .. } => StatusCode::BAD_REQUEST,
            DispatchError::Unsupported { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            DispatchError::UnknownOperation { .. } => "UNKNOWN_OPERATION",
            DispatchError::EmptyOperationName => "EMPTY_OPERATION_NAME",
            DispatchError::UnknownType { .. } => "UNKNOWN_TYPE",
            DispatchError::MissingArgument { .. } => "MISSING_ARGUMENT",
            DispatchError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            DispatchError::MalformedQuery { .. } => "MALFORMED_QUERY",
            DispatchError::Unsupported { .. } => "UNSUPPORTED",
        }
    }
}

impl From<DispatchError> for RefractError {
    fn from(err: DispatchError) -> Self {
        RefractError::Dispatch(err)
    }
}

// =============================================================================
// Shaping Errors
// =============================================================================

/// Errors raised while projecting a resolver result onto a selection
///
/// One invalid field fails its whole operation; no partial data is returned
/// for that sub-path.
#[derive(Debug)]
pub enum ShapingError {
    /// The selection names a field the type does not declare
    UnknownField { field: String, type_name: String },

    /// A non-nullable field's value was absent or null
    NullabilityViolation { field: String, type_name: String },

    /// The value cannot be projected onto the declared shape
    UnshapeableValue {
        type_name: String,
        expected: String,
        actual: ValueKind,
    },
}

impl fmt::Display for ShapingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapingError::UnknownField { field, type_name } => {
                write!(f, "Type '{}' has no field '{}'", type_name, field)
            }
            ShapingError::NullabilityViolation { field, type_name } => {
                write!(
                    f,
                    "Non-nullable field '{}.{}' resolved to null",
                    type_name, field
                )
            }
            ShapingError::UnshapeableValue {
                type_name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Cannot shape value for type '{}': expected {}, got {}",
                    type_name, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for ShapingError {}

impl ShapingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ShapingError::UnknownField { .. } => StatusCode::BAD_REQUEST,
            ShapingError::NullabilityViolation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ShapingError::UnshapeableValue { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ShapingError::UnknownField { .. } => "UNKNOWN_FIELD",
            ShapingError::NullabilityViolation { .. } => "NULLABILITY_VIOLATION",
            ShapingError::UnshapeableValue { .. } => "UNSHAPEABLE_VALUE",
        }
    }
}

impl From<ShapingError> for RefractError {
    fn from(err: ShapingError) -> Self {
        RefractError::Shaping(err)
    }
}

// =============================================================================
// Resolver Errors
// =============================================================================

/// A failure raised inside a bound resolver, wrapped at the dispatcher
/// boundary. Never crashes the serving process and is never retried.
#[derive(Debug)]
pub struct ResolverError {
    pub operation: String,
    pub cause: anyhow::Error,
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Resolver for operation '{}' failed: {}",
            self.operation, self.cause
        )
    }
}

impl std::error::Error for ResolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

impl From<ResolverError> for RefractError {
    fn from(err: ResolverError) -> Self {
        RefractError::Resolver(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<ConfigError> for RefractError {
    fn from(err: ConfigError) -> Self {
        RefractError::Config(err)
    }
}

impl From<serde_json::Error> for RefractError {
    fn from(err: serde_json::Error) -> Self {
        RefractError::Internal(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for refract operations
pub type RefractResult<T> = Result<T, RefractError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_operation_display() {
        let err = DispatchError::UnknownOperation {
            operation: "task".to_string(),
            kind: OperationKind::Query,
        };
        assert!(err.to_string().contains("task"));
        assert!(err.to_string().contains("query"));
    }

    #[test]
    fn test_dispatch_error_status_codes() {
        let err = DispatchError::UnknownOperation {
            operation: "task".to_string(),
            kind: OperationKind::Query,
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = DispatchError::MissingArgument {
            argument: "id".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_argument_path_in_details() {
        let err: RefractError = DispatchError::InvalidArgument {
            path: vec!["data".to_string(), "value".to_string()],
            expected: "object".to_string(),
            actual: ValueKind::String,
        }
        .into();

        assert_eq!(err.path(), vec!["data", "value"]);
        let details = err.to_response().details.expect("should have details");
        assert_eq!(details["expected"], "object");
        assert_eq!(details["actual"], "string");
    }

    #[test]
    fn test_registration_error_codes() {
        let err = RegistrationError::DuplicateType {
            type_name: "Task".to_string(),
        };
        assert_eq!(err.error_code(), "DUPLICATE_TYPE");

        let err = RegistrationError::DuplicateOperation {
            operation: "task".to_string(),
            kind: OperationKind::Mutation,
        };
        assert_eq!(err.error_code(), "DUPLICATE_OPERATION");
    }

    #[test]
    fn test_shaping_error_display() {
        let err = ShapingError::NullabilityViolation {
            field: "id".to_string(),
            type_name: "Task".to_string(),
        };
        assert!(err.to_string().contains("Task.id"));
        assert!(err.to_string().contains("null"));
    }

    #[test]
    fn test_resolver_error_wraps_cause() {
        let err = ResolverError {
            operation: "task".to_string(),
            cause: anyhow::anyhow!("backend unavailable"),
        };
        assert!(err.to_string().contains("task"));
        assert!(err.to_string().contains("backend unavailable"));

        let refract: RefractError = err.into();
        assert_eq!(refract.error_code(), "RESOLVER_FAILED");
        assert_eq!(refract.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_cancelled_is_distinct_from_failure() {
        let err = RefractError::Cancelled {
            operation: "task".to_string(),
        };
        assert_eq!(err.error_code(), "CANCELLED");
        assert_ne!(err.error_code(), "RESOLVER_FAILED");
    }

    #[test]
    fn test_error_response_serialization() {
        let err: RefractError = ShapingError::UnknownField {
            field: "baseType".to_string(),
            type_name: "ItemType".to_string(),
        }
        .into();
        let response = err.to_response();
        assert_eq!(response.code, "UNKNOWN_FIELD");
        assert!(response.details.is_some());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error as _;
        let err = RefractError::Resolver(ResolverError {
            operation: "task".to_string(),
            cause: anyhow::anyhow!("root cause"),
        });
        let source = err.source().expect("should have source");
        assert!(source.to_string().contains("task"));
    }
}
