//! Response shaping: projecting resolver results onto selections
//!
//! Shaping produces a pruned copy of a resolver result containing exactly
//! the requested fields, recursively for nested object and list fields.
//! The input value is never mutated. One invalid field fails the whole
//! operation; no partial data is returned.

pub mod selection;

pub use selection::{Selection, SelectionSet};

use crate::core::error::{RefractError, ShapingError};
use crate::core::value::ValueKind;
use crate::schema::descriptor::FieldKind;
use crate::schema::registry::SchemaRegistry;
use serde_json::{Map, Value};

/// Project a resolver result onto a selection against a registered type.
///
/// - Selections naming undeclared fields fail with `UnknownField`.
/// - A non-nullable field whose value is absent or null fails with
///   `NullabilityViolation` rather than silently coercing to null.
/// - List fields shape element-wise; an empty list shapes to an empty list.
/// - An empty selection returns the value verbatim.
pub fn shape(
    registry: &SchemaRegistry,
    type_name: &str,
    value: &Value,
    selection: &SelectionSet,
) -> Result<Value, RefractError> {
    if value.is_null() || selection.is_empty() {
        return Ok(value.clone());
    }

    let descriptor = registry.lookup_type(type_name)?;
    let Some(object) = value.as_object() else {
        return Err(ShapingError::UnshapeableValue {
            type_name: type_name.to_string(),
            expected: "object".to_string(),
            actual: ValueKind::of(value),
        }
        .into());
    };

    let mut shaped = Map::with_capacity(selection.0.len());
    for selected in selection.iter() {
        let Some(field) = descriptor.field(&selected.field) else {
            return Err(ShapingError::UnknownField {
                field: selected.field.clone(),
                type_name: type_name.to_string(),
            }
            .into());
        };

        let raw = object.get(&field.name).unwrap_or(&Value::Null);
        if raw.is_null() {
            if !field.nullable {
                return Err(ShapingError::NullabilityViolation {
                    field: field.name.clone(),
                    type_name: type_name.to_string(),
                }
                .into());
            }
            shaped.insert(field.name.clone(), Value::Null);
            continue;
        }

        let value = shape_field(registry, &field.kind, raw, &selected.nested, type_name, &field.name)?;
        shaped.insert(field.name.clone(), value);
    }

    Ok(Value::Object(shaped))
}

/// Shape a single non-null field value according to its declared kind.
fn shape_field(
    registry: &SchemaRegistry,
    kind: &FieldKind,
    value: &Value,
    nested: &SelectionSet,
    owner_type: &str,
    field_name: &str,
) -> Result<Value, RefractError> {
    match kind {
        // Scalars copy verbatim; there is nothing to prune.
        FieldKind::Scalar(_) => Ok(value.clone()),

        FieldKind::Object { type_name } => shape(registry, type_name, value, nested),

        FieldKind::List {
            element,
            element_nullable,
        } => {
            let Some(items) = value.as_array() else {
                return Err(ShapingError::UnshapeableValue {
                    type_name: owner_type.to_string(),
                    expected: "list".to_string(),
                    actual: ValueKind::of(value),
                }
                .into());
            };

            let mut shaped = Vec::with_capacity(items.len());
            for item in items {
                if item.is_null() {
                    if !element_nullable {
                        return Err(ShapingError::NullabilityViolation {
                            field: field_name.to_string(),
                            type_name: owner_type.to_string(),
                        }
                        .into());
                    }
                    shaped.push(Value::Null);
                    continue;
                }
                shaped.push(shape_field(
                    registry, element, item, nested, owner_type, field_name,
                )?);
            }
            Ok(Value::Array(shaped))
        }
    }
}
