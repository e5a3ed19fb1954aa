//! SDL export
//!
//! Renders the registry as GraphQL SDL text for the schema endpoint.
//! Output is deterministic: types and operations appear in registration
//! order.

use crate::schema::descriptor::OperationKind;
use crate::schema::registry::SchemaRegistry;
use std::fmt::Write as _;

/// Renders a frozen registry as SDL.
pub struct SdlExporter<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> SdlExporter<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Generate the complete SDL schema.
    pub fn generate_sdl(&self) -> String {
        let mut sdl = String::new();

        for descriptor in self.registry.types() {
            let _ = writeln!(sdl, "type {} {{", descriptor.name());
            for field in descriptor.fields() {
                let _ = writeln!(sdl, "  {}", field);
            }
            sdl.push_str("}\n\n");
        }

        let has_queries = self.write_root(&mut sdl, OperationKind::Query, "Query");
        let has_mutations = self.write_root(&mut sdl, OperationKind::Mutation, "Mutation");

        sdl.push_str("schema {\n");
        if has_queries {
            sdl.push_str("  query: Query\n");
        }
        if has_mutations {
            sdl.push_str("  mutation: Mutation\n");
        }
        sdl.push_str("}\n");

        sdl
    }

    /// Write one root type; returns whether it had any operations.
    fn write_root(&self, sdl: &mut String, kind: OperationKind, root_name: &str) -> bool {
        let mut bindings = self.registry.operations(kind).peekable();
        if bindings.peek().is_none() {
            return false;
        }

        let _ = writeln!(sdl, "type {} {{", root_name);
        for binding in bindings {
            let arguments = binding
                .arguments()
                .iter()
                .map(|argument| {
                    let bang = if argument.required { "!" } else { "" };
                    format!("{}: {}{}", argument.name, argument.kind, bang)
                })
                .collect::<Vec<_>>()
                .join(", ");

            if arguments.is_empty() {
                let _ = writeln!(sdl, "  {}: {}", binding.name(), binding.return_type());
            } else {
                let _ = writeln!(
                    sdl,
                    "  {}({}): {}",
                    binding.name(),
                    arguments,
                    binding.return_type()
                );
            }
        }
        sdl.push_str("}\n\n");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::FnResolver;
    use crate::schema::SchemaBuilder;
    use crate::schema::descriptor::{
        ArgumentDescriptor, FieldDescriptor, FieldKind, ScalarType, TypeDescriptor,
    };
    use serde_json::{Value, json};

    fn sample_registry() -> SchemaRegistry {
        SchemaBuilder::new()
            .register_type(
                TypeDescriptor::new("Task")
                    .with_field(FieldDescriptor::scalar("id", ScalarType::Id).non_null())
                    .with_field(FieldDescriptor::list(
                        "itemTypes",
                        FieldKind::object("ItemType"),
                    )),
            )
            .expect("Task should register")
            .register_type(
                TypeDescriptor::new("ItemType")
                    .with_field(FieldDescriptor::scalar("itemTypeId", ScalarType::String)),
            )
            .expect("ItemType should register")
            .query(
                "task",
                "Task",
                vec![],
                FnResolver::new(|_args: Value| async { Ok(json!(null)) }),
            )
            .expect("query should register")
            .mutation(
                "submitData",
                "Task",
                vec![
                    ArgumentDescriptor::new(
                        "data",
                        FieldKind::list_of(FieldKind::object("ItemType")),
                    )
                    .required(),
                ],
                FnResolver::new(|_args: Value| async { Ok(json!(null)) }),
            )
            .expect("mutation should register")
            .build()
            .expect("schema should build")
    }

    #[test]
    fn test_sdl_contains_types_and_fields() {
        let registry = sample_registry();
        let sdl = SdlExporter::new(&registry).generate_sdl();

        assert!(sdl.contains("type Task {"));
        assert!(sdl.contains("  id: ID!"));
        assert!(sdl.contains("  itemTypes: [ItemType]"));
        assert!(sdl.contains("type ItemType {"));
    }

    #[test]
    fn test_sdl_contains_roots_and_schema_block() {
        let registry = sample_registry();
        let sdl = SdlExporter::new(&registry).generate_sdl();

        assert!(sdl.contains("type Query {"));
        assert!(sdl.contains("  task: Task"));
        assert!(sdl.contains("type Mutation {"));
        assert!(sdl.contains("  submitData(data: [ItemType]!): Task"));
        assert!(sdl.contains("schema {"));
        assert!(sdl.contains("  query: Query"));
        assert!(sdl.contains("  mutation: Mutation"));
    }

    #[test]
    fn test_sdl_omits_empty_mutation_root() {
        let registry = SchemaBuilder::new()
            .register_type(TypeDescriptor::new("Task"))
            .expect("type should register")
            .query(
                "task",
                "Task",
                vec![],
                FnResolver::new(|_args: Value| async { Ok(json!(null)) }),
            )
            .expect("query should register")
            .build()
            .expect("schema should build");

        let sdl = SdlExporter::new(&registry).generate_sdl();
        assert!(!sdl.contains("type Mutation"));
        assert!(!sdl.contains("  mutation: Mutation"));
    }

    #[test]
    fn test_sdl_is_deterministic() {
        let registry = sample_registry();
        let first = SdlExporter::new(&registry).generate_sdl();
        let second = SdlExporter::new(&registry).generate_sdl();
        assert_eq!(first, second);
    }
}
