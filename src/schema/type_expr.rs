//! Parser for textual type expressions used in configuration files
//!
//! Configuration declares field and argument types with the usual compact
//! syntax: `ID!`, `[ItemType]`, `[String!]!`. This module turns an
//! expression into a [`FieldKind`] plus a nullability flag.

use crate::schema::descriptor::{FieldKind, ScalarType};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors produced while parsing a type expression.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeExprError {
    #[error("empty type expression")]
    Empty,

    #[error("unbalanced brackets in type expression '{0}'")]
    UnbalancedBrackets(String),

    #[error("invalid type name '{0}'")]
    InvalidName(String),
}

fn name_regex() -> &'static Regex {
    static NAME: OnceLock<Regex> = OnceLock::new();
    NAME.get_or_init(|| Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").expect("static regex"))
}

/// Whether a string is a valid type/field/operation name.
pub fn is_valid_name(name: &str) -> bool {
    name_regex().is_match(name)
}

/// Parse a type expression into its kind and nullability.
///
/// Built-in scalar names (`ID`, `String`, `Int`, `Float`, `Boolean`) parse
/// to scalars; any other name is a reference to a registered object type.
///
/// ```rust,ignore
/// let (kind, nullable) = parse_type_expr("[ItemType!]!")?;
/// assert!(!nullable);
/// ```
pub fn parse_type_expr(expr: &str) -> Result<(FieldKind, bool), TypeExprError> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(TypeExprError::Empty);
    }

    let (inner, nullable) = match expr.strip_suffix('!') {
        Some(inner) => (inner.trim_end(), false),
        None => (expr, true),
    };
    if inner.is_empty() {
        return Err(TypeExprError::Empty);
    }

    if let Some(rest) = inner.strip_prefix('[') {
        let Some(element_expr) = rest.strip_suffix(']') else {
            return Err(TypeExprError::UnbalancedBrackets(expr.to_string()));
        };
        let (element, element_nullable) = parse_type_expr(element_expr)?;
        return Ok((
            FieldKind::List {
                element: Box::new(element),
                element_nullable,
            },
            nullable,
        ));
    }
    if inner.ends_with(']') {
        return Err(TypeExprError::UnbalancedBrackets(expr.to_string()));
    }

    if !is_valid_name(inner) {
        return Err(TypeExprError::InvalidName(inner.to_string()));
    }

    let kind = match ScalarType::from_name(inner) {
        Some(scalar) => FieldKind::Scalar(scalar),
        None => FieldKind::object(inner),
    };
    Ok((kind, nullable))
}
