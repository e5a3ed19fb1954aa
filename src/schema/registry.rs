//! The schema registry: authoritative set of type and operation definitions
//!
//! Built once at process startup, validated, then treated as read-only.
//! Shared via `Arc`; concurrent lookups need no locking.

use crate::core::error::{DispatchError, RefractError, RegistrationError};
use crate::schema::descriptor::{
    FieldKind, OperationBinding, OperationKind, TypeDescriptor,
};
use crate::schema::type_expr::is_valid_name;
use indexmap::IndexMap;

/// Registry of all types and operation bindings in the application.
///
/// Query and Mutation operations live in separate namespaces: registering
/// `task` as a query and `task` as a mutation is allowed, registering two
/// queries named `task` is not.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    types: IndexMap<String, TypeDescriptor>,
    operations: IndexMap<(OperationKind, String), OperationBinding>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
            operations: IndexMap::new(),
        }
    }

    /// Register a type descriptor.
    ///
    /// Fails if a type with the same name already exists, or if the type or
    /// one of its fields carries an invalid name.
    pub fn register_type(&mut self, descriptor: TypeDescriptor) -> Result<(), RefractError> {
        if !is_valid_name(descriptor.name()) {
            return Err(RegistrationError::InvalidName {
                name: descriptor.name().to_string(),
                context: "a type".to_string(),
            }
            .into());
        }
        for field in descriptor.fields() {
            if !is_valid_name(&field.name) {
                return Err(RegistrationError::InvalidName {
                    name: field.name.clone(),
                    context: format!("a field of type '{}'", descriptor.name()),
                }
                .into());
            }
        }
        if self.types.contains_key(descriptor.name()) {
            return Err(RegistrationError::DuplicateType {
                type_name: descriptor.name().to_string(),
            }
            .into());
        }
        self.types
            .insert(descriptor.name().to_string(), descriptor);
        Ok(())
    }

    /// Register an operation binding.
    ///
    /// Fails if an operation with the same name already exists in the same
    /// namespace (Query vs Mutation namespaces are distinct).
    pub fn register_operation(&mut self, binding: OperationBinding) -> Result<(), RefractError> {
        if !is_valid_name(binding.name()) {
            return Err(RegistrationError::InvalidName {
                name: binding.name().to_string(),
                context: format!("a {}", binding.kind()),
            }
            .into());
        }
        for argument in binding.arguments() {
            if !is_valid_name(&argument.name) {
                return Err(RegistrationError::InvalidName {
                    name: argument.name.clone(),
                    context: format!("an argument of '{}'", binding.name()),
                }
                .into());
            }
        }
        let key = (binding.kind(), binding.name().to_string());
        if self.operations.contains_key(&key) {
            return Err(RegistrationError::DuplicateOperation {
                operation: binding.name().to_string(),
                kind: binding.kind(),
            }
            .into());
        }
        self.operations.insert(key, binding);
        Ok(())
    }

    /// Look up an operation binding by name and kind.
    pub fn lookup_operation(
        &self,
        name: &str,
        kind: OperationKind,
    ) -> Result<&OperationBinding, RefractError> {
        self.operations
            .get(&(kind, name.to_string()))
            .ok_or_else(|| {
                DispatchError::UnknownOperation {
                    operation: name.to_string(),
                    kind,
                }
                .into()
            })
    }

    /// Look up a type descriptor by name.
    pub fn lookup_type(&self, name: &str) -> Result<&TypeDescriptor, RefractError> {
        self.types.get(name).ok_or_else(|| {
            DispatchError::UnknownType {
                type_name: name.to_string(),
            }
            .into()
        })
    }

    /// All registered types, in registration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    /// All operations of one kind, in registration order.
    pub fn operations(&self, kind: OperationKind) -> impl Iterator<Item = &OperationBinding> {
        self.operations
            .values()
            .filter(move |binding| binding.kind() == kind)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Validate that every object reference points at a registered type.
    ///
    /// Called by the builder after all registrations; a registry that fails
    /// here must not serve.
    pub fn validate_references(&self) -> Result<(), RefractError> {
        for descriptor in self.types.values() {
            for field in descriptor.fields() {
                for referenced in object_references(&field.kind) {
                    if !self.types.contains_key(referenced) {
                        return Err(RegistrationError::DanglingFieldType {
                            type_name: descriptor.name().to_string(),
                            field: field.name.clone(),
                            referenced: referenced.to_string(),
                        }
                        .into());
                    }
                }
            }
        }

        for binding in self.operations.values() {
            if !self.types.contains_key(binding.return_type()) {
                return Err(RegistrationError::UnknownReturnType {
                    operation: binding.name().to_string(),
                    kind: binding.kind(),
                    return_type: binding.return_type().to_string(),
                }
                .into());
            }
            for argument in binding.arguments() {
                for referenced in object_references(&argument.kind) {
                    if !self.types.contains_key(referenced) {
                        return Err(RegistrationError::UnknownArgumentType {
                            operation: binding.name().to_string(),
                            argument: argument.name.clone(),
                            referenced: referenced.to_string(),
                        }
                        .into());
                    }
                }
            }
        }

        Ok(())
    }
}

/// Collect the object type names a field kind refers to.
fn object_references(kind: &FieldKind) -> Vec<&str> {
    match kind {
        FieldKind::Scalar(_) => Vec::new(),
        FieldKind::Object { type_name } => vec![type_name.as_str()],
        FieldKind::List { element, .. } => object_references(element),
    }
}
