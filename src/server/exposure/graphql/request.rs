//! Marshalling inbound GraphQL query text into execution requests
//!
//! The exposure accepts standard `{query, variables}` bodies, parses the
//! query text with `graphql-parser` and turns each top-level field into an
//! [`ExecutionRequest`]-shaped unit: operation name, argument payload (with
//! variables substituted) and a selection tree. Fragments and subscriptions
//! are rejected.

use crate::core::error::{DispatchError, RefractError};
use crate::schema::descriptor::OperationKind;
use crate::shape::{Selection, SelectionSet};
use graphql_parser::query::{
    Definition, Field, OperationDefinition, Selection as GqlSelection,
    SelectionSet as GqlSelectionSet, Value as GqlValue, parse_query,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One top-level field of a parsed document, ready for dispatch.
#[derive(Debug, Clone)]
pub struct FieldRequest {
    pub operation: String,
    pub arguments: Value,
    pub selection: SelectionSet,
}

/// Parse a GraphQL document into its kind and top-level field requests.
pub fn parse_document(
    query: &str,
    variables: &HashMap<String, Value>,
) -> Result<(OperationKind, Vec<FieldRequest>), RefractError> {
    let document = parse_query::<String>(query).map_err(|e| DispatchError::MalformedQuery {
        message: e.to_string(),
    })?;

    let operation = document
        .definitions
        .iter()
        .find_map(|definition| match definition {
            Definition::Operation(op) => Some(op),
            Definition::Fragment(_) => None,
        })
        .ok_or_else(|| DispatchError::MalformedQuery {
            message: "no operation found in document".to_string(),
        })?;

    let (kind, items) = match operation {
        OperationDefinition::Query(query) => (OperationKind::Query, &query.selection_set.items),
        OperationDefinition::SelectionSet(set) => (OperationKind::Query, &set.items),
        OperationDefinition::Mutation(mutation) => {
            (OperationKind::Mutation, &mutation.selection_set.items)
        }
        OperationDefinition::Subscription(_) => {
            return Err(DispatchError::Unsupported {
                feature: "Subscriptions".to_string(),
            }
            .into());
        }
    };

    let mut requests = Vec::new();
    for item in items {
        let GqlSelection::Field(field) = item else {
            return Err(DispatchError::Unsupported {
                feature: "Fragments".to_string(),
            }
            .into());
        };
        requests.push(FieldRequest {
            operation: field.name.clone(),
            arguments: arguments_to_json(field, variables),
            selection: convert_selection_set(&field.selection_set)?,
        });
    }

    Ok((kind, requests))
}

/// Build the argument payload for a field, substituting variables.
fn arguments_to_json(field: &Field<'_, String>, variables: &HashMap<String, Value>) -> Value {
    if field.arguments.is_empty() {
        return Value::Null;
    }
    let mut map = Map::new();
    for (name, value) in &field.arguments {
        map.insert(name.clone(), gql_value_to_json(value, variables));
    }
    Value::Object(map)
}

/// Convert a GraphQL literal to JSON, resolving variable references.
fn gql_value_to_json(value: &GqlValue<'_, String>, variables: &HashMap<String, Value>) -> Value {
    match value {
        GqlValue::Null => Value::Null,
        GqlValue::Int(i) => Value::from(i.as_i64().unwrap_or(0)),
        GqlValue::Float(f) => Value::from(*f),
        GqlValue::String(s) => Value::from(s.clone()),
        GqlValue::Boolean(b) => Value::from(*b),
        GqlValue::Enum(e) => Value::from(e.clone()),
        GqlValue::List(list) => Value::Array(
            list.iter()
                .map(|item| gql_value_to_json(item, variables))
                .collect(),
        ),
        GqlValue::Object(object) => {
            let mut map = Map::new();
            for (key, member) in object {
                map.insert(key.clone(), gql_value_to_json(member, variables));
            }
            Value::Object(map)
        }
        GqlValue::Variable(name) => variables.get(name).cloned().unwrap_or(Value::Null),
    }
}

/// Convert a parsed selection set into the shaper's selection tree.
fn convert_selection_set(
    set: &GqlSelectionSet<'_, String>,
) -> Result<SelectionSet, RefractError> {
    let mut selections = Vec::new();
    for item in &set.items {
        let GqlSelection::Field(field) = item else {
            return Err(DispatchError::Unsupported {
                feature: "Fragments".to_string(),
            }
            .into());
        };
        selections.push(Selection {
            field: field.name.clone(),
            nested: convert_selection_set(&field.selection_set)?,
        });
    }
    Ok(SelectionSet::new(selections))
}
