//! SchemaBuilder for fluent schema construction
//!
//! The registry is built once at startup through this builder, then frozen.
//! `build()` runs reference validation, so a schema with dangling type
//! references or unbound operations never starts serving.

use crate::config::SchemaConfig;
use crate::core::error::{RefractError, RegistrationError};
use crate::core::resolver::Resolver;
use crate::schema::descriptor::{
    ArgumentDescriptor, OperationBinding, OperationKind, TypeDescriptor,
};
use crate::schema::registry::SchemaRegistry;
use indexmap::IndexMap;
use std::sync::Arc;

/// A declared operation signature waiting for its resolver.
#[derive(Debug, Clone)]
struct PendingOperation {
    return_type: String,
    arguments: Vec<ArgumentDescriptor>,
}

/// Builder for creating a validated [`SchemaRegistry`]
///
/// # Example
///
/// ```ignore
/// let registry = SchemaBuilder::new()
///     .register_type(task_type)?
///     .query("task", "Task", vec![], task_resolver)?
///     .build()?;
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    registry: SchemaRegistry,
    pending: IndexMap<(OperationKind, String), PendingOperation>,
}

impl SchemaBuilder {
    /// Create a new SchemaBuilder
    pub fn new() -> Self {
        Self {
            registry: SchemaRegistry::new(),
            pending: IndexMap::new(),
        }
    }

    /// Register a type descriptor.
    pub fn register_type(mut self, descriptor: TypeDescriptor) -> Result<Self, RefractError> {
        self.registry.register_type(descriptor)?;
        Ok(self)
    }

    /// Register a query operation with its resolver.
    pub fn query(
        self,
        name: impl Into<String>,
        return_type: impl Into<String>,
        arguments: Vec<ArgumentDescriptor>,
        resolver: impl Resolver + 'static,
    ) -> Result<Self, RefractError> {
        self.operation(OperationBinding::new(
            name,
            OperationKind::Query,
            return_type,
            arguments,
            Arc::new(resolver),
        ))
    }

    /// Register a mutation operation with its resolver.
    pub fn mutation(
        self,
        name: impl Into<String>,
        return_type: impl Into<String>,
        arguments: Vec<ArgumentDescriptor>,
        resolver: impl Resolver + 'static,
    ) -> Result<Self, RefractError> {
        self.operation(OperationBinding::new(
            name,
            OperationKind::Mutation,
            return_type,
            arguments,
            Arc::new(resolver),
        ))
    }

    /// Register a fully constructed operation binding.
    pub fn operation(mut self, binding: OperationBinding) -> Result<Self, RefractError> {
        self.registry.register_operation(binding)?;
        Ok(self)
    }

    /// Load type and operation declarations from configuration.
    ///
    /// Types register immediately; declared operations are recorded and wait
    /// for a resolver via [`bind_query`](Self::bind_query) /
    /// [`bind_mutation`](Self::bind_mutation). `build()` fails if any
    /// declared operation is still unbound.
    pub fn load_config(mut self, config: &SchemaConfig) -> Result<Self, RefractError> {
        for type_config in &config.types {
            let descriptor = type_config.to_descriptor()?;
            self.registry.register_type(descriptor)?;
        }
        for operation in &config.operations {
            let arguments = operation.argument_descriptors()?;
            self.pending.insert(
                (operation.kind, operation.name.clone()),
                PendingOperation {
                    return_type: operation.returns.clone(),
                    arguments,
                },
            );
        }
        Ok(self)
    }

    /// Bind a resolver to a query declared in configuration.
    pub fn bind_query(
        self,
        name: impl Into<String>,
        resolver: impl Resolver + 'static,
    ) -> Result<Self, RefractError> {
        self.bind(OperationKind::Query, name.into(), Arc::new(resolver))
    }

    /// Bind a resolver to a mutation declared in configuration.
    pub fn bind_mutation(
        self,
        name: impl Into<String>,
        resolver: impl Resolver + 'static,
    ) -> Result<Self, RefractError> {
        self.bind(OperationKind::Mutation, name.into(), Arc::new(resolver))
    }

    fn bind(
        mut self,
        kind: OperationKind,
        name: String,
        resolver: Arc<dyn Resolver>,
    ) -> Result<Self, RefractError> {
        let Some(pending) = self.pending.shift_remove(&(kind, name.clone())) else {
            return Err(RegistrationError::UndeclaredOperation {
                operation: name,
                kind,
            }
            .into());
        };
        self.registry.register_operation(OperationBinding::new(
            name,
            kind,
            pending.return_type,
            pending.arguments,
            resolver,
        ))?;
        Ok(self)
    }

    /// Validate and freeze the registry.
    pub fn build(self) -> Result<SchemaRegistry, RefractError> {
        if let Some(((kind, name), _)) = self.pending.first() {
            return Err(RegistrationError::UnboundOperation {
                operation: name.clone(),
                kind: *kind,
            }
            .into());
        }

        self.registry.validate_references()?;

        tracing::debug!(
            types = self.registry.type_count(),
            operations = self.registry.operation_count(),
            "Schema registry built"
        );

        Ok(self.registry)
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::FnResolver;
    use crate::schema::descriptor::{FieldDescriptor, ScalarType};
    use serde_json::{Value, json};

    fn task_type() -> TypeDescriptor {
        TypeDescriptor::new("Task")
            .with_field(FieldDescriptor::scalar("id", ScalarType::Id).non_null())
    }

    #[test]
    fn test_build_minimal_schema() {
        let registry = SchemaBuilder::new()
            .register_type(task_type())
            .expect("type should register")
            .query(
                "task",
                "Task",
                vec![],
                FnResolver::new(|_args: Value| async { Ok(json!({"id": "1"})) }),
            )
            .expect("query should register")
            .build()
            .expect("build should succeed");

        assert_eq!(registry.type_count(), 1);
        assert_eq!(registry.operation_count(), 1);
    }

    #[test]
    fn test_build_rejects_dangling_reference() {
        let err = SchemaBuilder::new()
            .register_type(
                TypeDescriptor::new("Task")
                    .with_field(FieldDescriptor::object("owner", "User")),
            )
            .expect("type should register")
            .build()
            .expect_err("dangling ref should fail build");
        assert_eq!(err.error_code(), "DANGLING_FIELD_TYPE");
    }

    #[test]
    fn test_config_operation_must_be_bound() {
        let config = SchemaConfig::from_yaml_str(
            r#"
types:
  - name: Task
    fields:
      - name: id
        type: ID!
operations:
  - name: task
    kind: query
    returns: Task
"#,
        )
        .expect("config should parse");

        let err = SchemaBuilder::new()
            .load_config(&config)
            .expect("config should load")
            .build()
            .expect_err("unbound operation should fail build");
        assert_eq!(err.error_code(), "UNBOUND_OPERATION");
    }

    #[test]
    fn test_bind_undeclared_operation_fails() {
        let err = SchemaBuilder::new()
            .bind_query(
                "task",
                FnResolver::new(|_args: Value| async { Ok(json!(null)) }),
            )
            .expect_err("binding without declaration should fail");
        assert_eq!(err.error_code(), "UNDECLARED_OPERATION");
    }

    #[test]
    fn test_config_declared_operation_binds_and_builds() {
        let config = SchemaConfig::from_yaml_str(
            r#"
types:
  - name: Task
    fields:
      - name: id
        type: ID!
operations:
  - name: task
    kind: query
    returns: Task
"#,
        )
        .expect("config should parse");

        let registry = SchemaBuilder::new()
            .load_config(&config)
            .expect("config should load")
            .bind_query(
                "task",
                FnResolver::new(|_args: Value| async { Ok(json!({"id": "1"})) }),
            )
            .expect("bind should succeed")
            .build()
            .expect("build should succeed");

        assert!(
            registry
                .lookup_operation("task", OperationKind::Query)
                .is_ok()
        );
    }
}
