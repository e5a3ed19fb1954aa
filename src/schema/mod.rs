//! Schema definition: descriptors, registry and builder

pub mod builder;
pub mod descriptor;
pub mod registry;
pub mod type_expr;

pub use builder::SchemaBuilder;
pub use descriptor::{
    ArgumentDescriptor, FieldDescriptor, FieldKind, OperationBinding, OperationKind, ScalarType,
    TypeDescriptor,
};
pub use registry::SchemaRegistry;
pub use type_expr::{TypeExprError, parse_type_expr};
