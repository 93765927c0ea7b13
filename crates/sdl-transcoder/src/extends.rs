//! `@extends(types: [...])`: object types pulling additional types of the upstream
//! pool into the rendered schema.
//!
//! Names are compared in their quoted form: a list element is turned into its
//! GraphQL literal text (`"Extra"`) and matched exactly against the quoted name of
//! every type in the pool. An enum literal `Extra` therefore never matches.

use crate::{
    document::{Document, ObjectTypeDefinition, TypeDefinition, Value},
    schema::Schema,
};

pub const EXTENDS_DIRECTIVE: &str = "extends";
pub const TYPES_ARGUMENT: &str = "types";

/// The quoted type names referenced by the first `@extends` directive of every
/// object type, in document order. Duplicates are kept.
///
/// A missing or non-list `types` argument counts as no reference.
pub fn extension_type_names(document: &Document) -> Vec<String> {
    document.object_types().flat_map(referenced_names).collect()
}

/// The types of the pool whose quoted name is in `names`, with every pool type
/// they reference, in canonical order.
pub fn additional_types(schema: &Schema, names: &[String]) -> Vec<TypeDefinition> {
    if names.is_empty() {
        return Vec::new();
    }

    let matched = schema
        .types
        .iter()
        .filter(|ty| names.contains(&quoted(ty.name())))
        .map(TypeDefinition::name);

    schema.reachable_from(matched).into_iter().cloned().collect()
}

fn referenced_names(object: &ObjectTypeDefinition) -> Vec<String> {
    let Some(directive) = object.directive(EXTENDS_DIRECTIVE) else {
        return Vec::new();
    };

    let Some(value) = directive.argument(TYPES_ARGUMENT) else {
        tracing::debug!(type_name = %object.name, "ignoring @extends without a `types` argument");
        return Vec::new();
    };

    match value.as_list() {
        Some(values) => values.iter().map(ToString::to_string).collect(),
        None => {
            tracing::debug!(type_name = %object.name, %value, "ignoring @extends with a non-list `types` argument");
            Vec::new()
        }
    }
}

fn quoted(name: &str) -> String {
    Value::String(name.to_owned()).to_string()
}
