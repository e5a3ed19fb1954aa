//! Configuration loading and management
//!
//! Schema shape can be declared in YAML: types with their fields, and
//! operation signatures. Resolvers are code and are bound through the
//! [`SchemaBuilder`](crate::schema::SchemaBuilder) at startup.

use crate::schema::descriptor::{ArgumentDescriptor, FieldDescriptor, OperationKind, TypeDescriptor};
use crate::schema::type_expr::{TypeExprError, parse_type_expr};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error while reading a configuration file
    #[error("failed to read config file '{path}': {message}")]
    Io { path: String, message: String },

    /// Failed to parse the YAML document
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A declared type expression did not parse
    #[error("invalid type expression for '{context}': {source}")]
    TypeExpr {
        context: String,
        #[source]
        source: TypeExprError,
    },
}

/// Configuration for a single field of a declared type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Field name (e.g., "itemTypes")
    pub name: String,

    /// Type expression (e.g., "ID!", "[ItemType]")
    #[serde(rename = "type")]
    pub type_expr: String,
}

/// Configuration for a declared type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Type name (e.g., "Task")
    pub name: String,

    /// Ordered field declarations
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl TypeConfig {
    /// Convert into a registry descriptor.
    pub fn to_descriptor(&self) -> Result<TypeDescriptor, ConfigError> {
        let mut descriptor = TypeDescriptor::new(&self.name);
        for field in &self.fields {
            let (kind, nullable) =
                parse_type_expr(&field.type_expr).map_err(|source| ConfigError::TypeExpr {
                    context: format!("{}.{}", self.name, field.name),
                    source,
                })?;
            let mut fd = FieldDescriptor::new(&field.name, kind);
            fd.nullable = nullable;
            descriptor = descriptor.with_field(fd);
        }
        Ok(descriptor)
    }
}

/// Configuration for a declared operation argument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgumentConfig {
    /// Argument name (e.g., "data")
    pub name: String,

    /// Type expression (e.g., "[ItemTypeM]")
    #[serde(rename = "type")]
    pub type_expr: String,

    /// Whether the argument must be present in the payload
    #[serde(default)]
    pub required: bool,
}

/// Configuration for a declared operation signature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationConfig {
    /// Operation name (e.g., "task", "submitData")
    pub name: String,

    /// Operation namespace: query or mutation
    pub kind: OperationKind,

    /// Name of the registered type the operation returns
    pub returns: String,

    /// Declared arguments
    #[serde(default)]
    pub arguments: Vec<ArgumentConfig>,
}

impl OperationConfig {
    /// Convert the declared arguments into registry descriptors.
    ///
    /// A non-null type expression (`Foo!`) marks the argument required,
    /// as does the explicit `required` flag.
    pub fn argument_descriptors(&self) -> Result<Vec<ArgumentDescriptor>, ConfigError> {
        let mut descriptors = Vec::with_capacity(self.arguments.len());
        for argument in &self.arguments {
            let (kind, nullable) =
                parse_type_expr(&argument.type_expr).map_err(|source| ConfigError::TypeExpr {
                    context: format!("{}({})", self.name, argument.name),
                    source,
                })?;
            let mut descriptor = ArgumentDescriptor::new(&argument.name, kind);
            descriptor.required = argument.required || !nullable;
            descriptors.push(descriptor);
        }
        Ok(descriptors)
    }
}

/// Complete schema configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Declared types
    #[serde(default)]
    pub types: Vec<TypeConfig>,

    /// Declared operation signatures
    #[serde(default)]
    pub operations: Vec<OperationConfig>,
}

impl SchemaConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
