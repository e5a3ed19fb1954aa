//! Structural validation of argument payloads
//!
//! Arguments are checked against their declared kinds: scalar vs object vs
//! list, recursively through declared object and list types. This is a
//! shape check only; no deep semantic validation happens here.

use crate::core::error::{DispatchError, RefractError};
use crate::core::value::ValueKind;
use crate::schema::descriptor::{ArgumentDescriptor, FieldKind};
use crate::schema::registry::SchemaRegistry;
use serde_json::{Map, Value};

/// Validate an argument payload against the declared argument descriptors.
///
/// The payload must be a mapping (or null, treated as empty). Members the
/// declaration does not mention are ignored.
pub fn validate_arguments(
    registry: &SchemaRegistry,
    declared: &[ArgumentDescriptor],
    payload: &Value,
) -> Result<(), RefractError> {
    let empty = Map::new();
    let payload = match payload {
        Value::Null => &empty,
        Value::Object(map) => map,
        other => {
            return Err(DispatchError::InvalidArgument {
                path: Vec::new(),
                expected: "object".to_string(),
                actual: ValueKind::of(other),
            }
            .into());
        }
    };

    for argument in declared {
        match payload.get(&argument.name) {
            None | Some(Value::Null) => {
                if argument.required {
                    return Err(DispatchError::MissingArgument {
                        argument: argument.name.clone(),
                    }
                    .into());
                }
            }
            Some(value) => {
                check_kind(registry, &argument.kind, value, &[argument.name.clone()])?;
            }
        }
    }

    Ok(())
}

/// Check one value against its declared kind, recursively.
fn check_kind(
    registry: &SchemaRegistry,
    kind: &FieldKind,
    value: &Value,
    path: &[String],
) -> Result<(), RefractError> {
    match kind {
        FieldKind::Scalar(_) => {
            if !ValueKind::of(value).is_scalar() {
                return Err(mismatch(kind, value, path));
            }
            Ok(())
        }

        FieldKind::Object { type_name } => {
            let Some(object) = value.as_object() else {
                return Err(mismatch(kind, value, path));
            };
            // Recurse into members the referenced type declares; extras are
            // ignored and member presence is not enforced (structural only).
            let descriptor = registry.lookup_type(type_name)?;
            for field in descriptor.fields() {
                if let Some(member) = object.get(&field.name) {
                    if member.is_null() {
                        continue;
                    }
                    let mut member_path = path.to_vec();
                    member_path.push(field.name.clone());
                    check_kind(registry, &field.kind, member, &member_path)?;
                }
            }
            Ok(())
        }

        FieldKind::List {
            element,
            element_nullable,
        } => {
            let Some(items) = value.as_array() else {
                return Err(mismatch(kind, value, path));
            };
            for (index, item) in items.iter().enumerate() {
                let mut item_path = path.to_vec();
                item_path.push(index.to_string());
                if item.is_null() {
                    if !element_nullable {
                        return Err(mismatch(element, item, &item_path));
                    }
                    continue;
                }
                check_kind(registry, element, item, &item_path)?;
            }
            Ok(())
        }
    }
}

fn mismatch(kind: &FieldKind, value: &Value, path: &[String]) -> RefractError {
    DispatchError::InvalidArgument {
        path: path.to_vec(),
        expected: kind.to_string(),
        actual: ValueKind::of(value),
    }
    .into()
}
