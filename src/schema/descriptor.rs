//! Schema descriptors: types, fields, arguments and operation bindings
//!
//! Descriptors are plain data, immutable once registered. The registry owns
//! them exclusively; everything downstream borrows.

use crate::core::resolver::Resolver;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Id,
    String,
    Int,
    Float,
    Boolean,
}

impl ScalarType {
    /// Resolve a built-in scalar by name, if it is one.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ID" => Some(ScalarType::Id),
            "String" => Some(ScalarType::String),
            "Int" => Some(ScalarType::Int),
            "Float" => Some(ScalarType::Float),
            "Boolean" => Some(ScalarType::Boolean),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::Id => "ID",
            ScalarType::String => "String",
            ScalarType::Int => "Int",
            ScalarType::Float => "Float",
            ScalarType::Boolean => "Boolean",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The declared kind of a field or argument.
///
/// Object kinds reference a registered [`TypeDescriptor`] by name; dangling
/// references are a registration-time error, never a runtime one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(ScalarType),
    Object {
        type_name: String,
    },
    List {
        element: Box<FieldKind>,
        element_nullable: bool,
    },
}

impl FieldKind {
    pub fn object(type_name: impl Into<String>) -> Self {
        FieldKind::Object {
            type_name: type_name.into(),
        }
    }

    pub fn list_of(element: FieldKind) -> Self {
        FieldKind::List {
            element: Box::new(element),
            element_nullable: true,
        }
    }

    /// The structural shape validation expects for this kind.
    pub fn expects(&self) -> &'static str {
        match self {
            FieldKind::Scalar(_) => "scalar",
            FieldKind::Object { .. } => "object",
            FieldKind::List { .. } => "list",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(s) => write!(f, "{}", s),
            FieldKind::Object { type_name } => write!(f, "{}", type_name),
            FieldKind::List {
                element,
                element_nullable,
            } => {
                let bang = if *element_nullable { "" } else { "!" };
                write!(f, "[{}{}]", element, bang)
            }
        }
    }
}

/// A single field declared on a type. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub nullable: bool,
}

impl FieldDescriptor {
    /// Declare a nullable field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable: true,
        }
    }

    /// Declare a scalar field.
    pub fn scalar(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self::new(name, FieldKind::Scalar(scalar))
    }

    /// Declare an object field referencing a registered type.
    pub fn object(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::object(type_name))
    }

    /// Declare a list field with the given element kind.
    pub fn list(name: impl Into<String>, element: FieldKind) -> Self {
        Self::new(name, FieldKind::list_of(element))
    }

    /// Mark the field non-nullable.
    pub fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = if self.nullable { "" } else { "!" };
        write!(f, "{}: {}{}", self.name, self.kind, bang)
    }
}

/// A named type: an ordered sequence of field descriptors.
///
/// Created once at startup and owned exclusively by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field declaration (ordered).
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

/// A declared operation argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl ArgumentDescriptor {
    /// Declare an optional argument.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }

    /// Mark the argument required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Whether an operation reads or writes.
///
/// Query and Mutation are separate namespaces: the same operation name may
/// exist once under each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
        }
    }
}

/// The association between an operation name/kind and its resolver.
///
/// Owned by the registry; looked up by name at dispatch time.
#[derive(Clone)]
pub struct OperationBinding {
    name: String,
    kind: OperationKind,
    return_type: String,
    arguments: Vec<ArgumentDescriptor>,
    resolver: Arc<dyn Resolver>,
}

impl OperationBinding {
    pub fn new(
        name: impl Into<String>,
        kind: OperationKind,
        return_type: impl Into<String>,
        arguments: Vec<ArgumentDescriptor>,
        resolver: Arc<dyn Resolver>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            return_type: return_type.into(),
            arguments,
            resolver,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn arguments(&self) -> &[ArgumentDescriptor] {
        &self.arguments
    }

    pub fn resolver(&self) -> &Arc<dyn Resolver> {
        &self.resolver
    }
}

impl fmt::Debug for OperationBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationBinding")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("return_type", &self.return_type)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}
