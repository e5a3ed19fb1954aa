//! Operation dispatch
//!
//! The dispatcher locates a binding in the registry, validates the argument
//! payload, invokes the bound resolver and shapes the result. It performs
//! no I/O of its own: any I/O a resolver does is opaque, and the dispatcher
//! only awaits its completion. Resolvers are assumed non-idempotent and are
//! never retried.

use crate::core::error::{DispatchError, RefractError, ResolverError};
use crate::dispatch::arguments::validate_arguments;
use crate::dispatch::envelope::{ExecutionRequest, ExecutionResponse};
use crate::schema::descriptor::OperationKind;
use crate::schema::registry::SchemaRegistry;
use crate::shape::shape;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Dispatches operations against a frozen schema registry.
///
/// The registry is read-only after construction, so a single dispatcher is
/// safely shared across concurrent requests.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<SchemaRegistry>,
}

impl Dispatcher {
    /// Create a dispatcher over a frozen registry.
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// Locate and invoke an operation, returning the raw resolver result.
    ///
    /// No shaping is applied; use [`execute`](Self::execute) for the full
    /// request path.
    pub async fn dispatch(
        &self,
        kind: OperationKind,
        operation: &str,
        arguments: Value,
    ) -> Result<Value, RefractError> {
        if operation.is_empty() {
            return Err(DispatchError::EmptyOperationName.into());
        }

        let binding = self.registry.lookup_operation(operation, kind)?;
        validate_arguments(&self.registry, binding.arguments(), &arguments)?;

        tracing::debug!(operation, kind = %kind, "Dispatching operation");

        binding
            .resolver()
            .resolve(arguments)
            .await
            .map_err(|cause| {
                ResolverError {
                    operation: operation.to_string(),
                    cause,
                }
                .into()
            })
    }

    /// Like [`dispatch`](Self::dispatch), but stops waiting when the token
    /// fires.
    ///
    /// Cancellation is cooperative: the resolver future is dropped, not
    /// forcibly terminated, and long-running resolvers are expected to
    /// observe the signal themselves.
    pub async fn dispatch_cancellable(
        &self,
        kind: OperationKind,
        operation: &str,
        arguments: Value,
        cancel: &CancellationToken,
    ) -> Result<Value, RefractError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(operation, "Dispatch cancelled by caller");
                Err(RefractError::Cancelled {
                    operation: operation.to_string(),
                })
            }
            result = self.dispatch(kind, operation, arguments) => result,
        }
    }

    /// Execute a full request: dispatch, then shape the result per the
    /// request's selection. Errors are returned in the response envelope,
    /// never raised.
    pub async fn execute(&self, request: ExecutionRequest) -> ExecutionResponse {
        match self.execute_inner(&request).await {
            Ok(data) => ExecutionResponse::success(data),
            Err(err) => {
                tracing::warn!(
                    operation = %request.operation,
                    kind = %request.kind,
                    error = %err,
                    "Operation failed"
                );
                ExecutionResponse::failure(&err)
            }
        }
    }

    /// Execute a full request, giving up when the token fires.
    pub async fn execute_cancellable(
        &self,
        request: ExecutionRequest,
        cancel: &CancellationToken,
    ) -> ExecutionResponse {
        let operation = request.operation.clone();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(operation = %operation, "Request cancelled by caller");
                ExecutionResponse::failure(&RefractError::Cancelled { operation })
            }
            response = self.execute(request) => response,
        }
    }

    async fn execute_inner(&self, request: &ExecutionRequest) -> Result<Value, RefractError> {
        let raw = self
            .dispatch(request.kind, &request.operation, request.arguments.clone())
            .await?;

        let binding = self
            .registry
            .lookup_operation(&request.operation, request.kind)?;
        shape(&self.registry, binding.return_type(), &raw, &request.selection)
    }
}
