//! Canonical ordering of a [`Document`].
//!
//! Normalization sorts the fields of every object and input object type by name,
//! then sorts the top-level definitions by a key derived from their kind and name:
//!
//! | definition                  | key            |
//! |-----------------------------|----------------|
//! | executable, extension       | `""`           |
//! | directive definition        | `"a"`          |
//! | schema definition           | `"b"`          |
//! | scalar                      | `"c" + name`   |
//! | input object                | `"d" + name`   |
//! | object                      | `"e" + name`   |
//! | interface, enum, union      | `name`         |
//!
//! Keys compare as the concatenated string, byte by byte. Interfaces, enums and
//! unions are therefore interleaved by bare name, and a name starting with an
//! uppercase letter sorts before every prefixed kind. The sort is stable.
//!
//! This byte order is kept on purpose so the rendered SDL stays byte-identical to
//! previously generated output.

use std::cmp::Ordering;

use crate::document::*;

/// Returns the canonical form of `document`. Only containers are reordered, no
/// definition is added, removed or modified, and `normalize(normalize(d)) == normalize(d)`.
pub fn normalize(document: Document) -> Document {
    let mut definitions: Vec<Definition> = document.definitions.into_iter().map(normalize_definition).collect();

    definitions.sort_by(|a, b| SortKey::of(a).cmp(&SortKey::of(b)));

    Document::new(definitions)
}

/// Sorts the fields of object and input object types. Other kinds are returned as is.
pub fn normalize_type_definition(type_definition: TypeDefinition) -> TypeDefinition {
    match type_definition {
        TypeDefinition::Object(mut object) => {
            object.fields.sort_by(|a, b| a.name.cmp(&b.name));
            TypeDefinition::Object(object)
        }
        TypeDefinition::InputObject(mut input_object) => {
            input_object.fields.sort_by(|a, b| a.name.cmp(&b.name));
            TypeDefinition::InputObject(input_object)
        }
        other => other,
    }
}

/// The ordering [`normalize`] applies to type definitions.
pub fn compare_type_definitions(a: &TypeDefinition, b: &TypeDefinition) -> Ordering {
    SortKey::of_type(a).cmp(&SortKey::of_type(b))
}

fn normalize_definition(definition: Definition) -> Definition {
    match definition {
        Definition::TypeSystem(TypeSystemDefinition::Type(type_definition)) => {
            Definition::from(normalize_type_definition(type_definition))
        }
        other => other,
    }
}

/// A `prefix + name` key, compared as if both parts were concatenated, without
/// allocating the concatenation.
#[derive(Debug, Clone, Copy)]
struct SortKey<'a> {
    prefix: &'static str,
    name: &'a str,
}

impl<'a> SortKey<'a> {
    const fn constant(prefix: &'static str) -> Self {
        SortKey { prefix, name: "" }
    }

    fn of(definition: &'a Definition) -> Self {
        match definition {
            Definition::Executable(_) | Definition::TypeSystemExtension(_) => SortKey::constant(""),
            Definition::TypeSystem(TypeSystemDefinition::Directive(_)) => SortKey::constant("a"),
            Definition::TypeSystem(TypeSystemDefinition::Schema(_)) => SortKey::constant("b"),
            Definition::TypeSystem(TypeSystemDefinition::Type(type_definition)) => SortKey::of_type(type_definition),
        }
    }

    fn of_type(type_definition: &'a TypeDefinition) -> Self {
        let prefix = match type_definition {
            TypeDefinition::Scalar(_) => "c",
            TypeDefinition::InputObject(_) => "d",
            TypeDefinition::Object(_) => "e",
            TypeDefinition::Interface(_) | TypeDefinition::Enum(_) | TypeDefinition::Union(_) => "",
        };

        SortKey {
            prefix,
            name: type_definition.name(),
        }
    }

    fn bytes(self) -> impl Iterator<Item = u8> + 'a {
        self.prefix.bytes().chain(self.name.bytes())
    }
}

impl PartialEq for SortKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey<'_> {}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes().cmp(other.bytes())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parse::{parse_executable, parse_schema};

    fn labels(document: &Document) -> Vec<String> {
        document
            .definitions
            .iter()
            .map(|definition| match definition {
                Definition::Executable(executable) => format!("executable {}", executable.name.as_deref().unwrap_or("")),
                Definition::TypeSystemExtension(extension) => {
                    format!("extension {}", extension.name.as_deref().unwrap_or(""))
                }
                Definition::TypeSystem(TypeSystemDefinition::Directive(directive)) => {
                    format!("directive {}", directive.name)
                }
                Definition::TypeSystem(TypeSystemDefinition::Schema(_)) => "schema".to_owned(),
                Definition::TypeSystem(TypeSystemDefinition::Type(type_definition)) => {
                    let kind = match type_definition {
                        TypeDefinition::Scalar(_) => "scalar",
                        TypeDefinition::InputObject(_) => "input",
                        TypeDefinition::Object(_) => "type",
                        TypeDefinition::Interface(_) => "interface",
                        TypeDefinition::Enum(_) => "enum",
                        TypeDefinition::Union(_) => "union",
                    };
                    format!("{kind} {}", type_definition.name())
                }
            })
            .collect()
    }

    fn field_names(document: &Document, type_name: &str) -> Vec<String> {
        match document.type_definitions().find(|ty| ty.name() == type_name).unwrap() {
            TypeDefinition::Object(object) => object.fields.iter().map(|field| field.name.clone()).collect(),
            TypeDefinition::InputObject(input) => input.fields.iter().map(|field| field.name.clone()).collect(),
            TypeDefinition::Interface(interface) => interface.fields.iter().map(|field| field.name.clone()).collect(),
            other => panic!("{} has no fields", other.name()),
        }
    }

    #[test]
    fn sorts_object_and_input_fields() {
        let document = parse_schema(indoc! {r#"
            type Query { f3: Int f1: Int f2: Int }
            input Filter { f3: Int f1: Int f2: Int }
            interface Node { f3: Int f1: Int }
        "#})
        .unwrap();

        let normalized = normalize(document);

        assert_eq!(field_names(&normalized, "Query"), ["f1", "f2", "f3"]);
        assert_eq!(field_names(&normalized, "Filter"), ["f1", "f2", "f3"]);
        // interface fields keep their declared order
        assert_eq!(field_names(&normalized, "Node"), ["f3", "f1"]);
    }

    #[test]
    fn kind_priority_beats_name() {
        let document = parse_schema(indoc! {r#"
            type Alpha { id: ID }
            scalar Zeta
            schema { query: Alpha }
            directive @cached on FIELD_DEFINITION
        "#})
        .unwrap();

        let normalized = normalize(document);

        assert_eq!(
            labels(&normalized),
            ["directive cached", "schema", "scalar Zeta", "type Alpha"]
        );
    }

    #[test]
    fn interfaces_enums_and_unions_interleave_by_name() {
        let document = parse_schema(indoc! {r#"
            union C = X
            interface B { id: ID }
            enum A { ONE }
        "#})
        .unwrap();

        assert_eq!(labels(&normalize(document)), ["enum A", "interface B", "union C"]);
    }

    #[test]
    fn keys_compare_as_concatenated_strings() {
        // "czz" (scalar zz) and "czz" (interface czz) are equal keys: input order is kept.
        // "Upper" sorts before the directive's "a", "lower" after the objects' "e" prefix.
        let document = parse_schema(indoc! {r#"
            scalar zz
            interface czz { id: ID }
            enum lower { A }
            directive @d on FIELD
            enum Upper { A }
            type Obj { id: ID }
        "#})
        .unwrap();

        assert_eq!(
            labels(&normalize(document)),
            [
                "enum Upper",
                "directive d",
                "scalar zz",
                "interface czz",
                "type Obj",
                "enum lower",
            ]
        );
    }

    #[test]
    fn executables_and_extensions_come_first_in_input_order() {
        let mut document = parse_schema(indoc! {r#"
            type Query { a: Int }
            extend type Query { b: Int }
            scalar Date
            extend scalar Date @specifiedBy(url: "https://example.com")
        "#})
        .unwrap();
        document.extend(parse_executable("query Second { a } query First { a }").unwrap().definitions);

        assert_eq!(
            labels(&normalize(document)),
            [
                "extension Query",
                "extension Date",
                "executable Second",
                "executable First",
                "scalar Date",
                "type Query",
            ]
        );
    }

    #[test]
    fn idempotent_and_content_preserving() {
        let document = parse_schema(indoc! {r#"
            type Query { users(first: Int = 10): [User!]! @cached viewer: User }
            type User implements Node { name: String id: ID! }
            interface Node { id: ID! }
            input UserFilter { name: String age: Int }
            enum Role { ADMIN USER }
            union Search = User
            scalar DateTime
            directive @cached(ttl: Int) on FIELD_DEFINITION
            schema { query: Query }
        "#})
        .unwrap();

        let once = normalize(document.clone());
        let twice = normalize(once.clone());

        assert_eq!(once, twice);
        assert_eq!(once.definitions.len(), document.definitions.len());

        for original in document.type_definitions() {
            let normalized = once.type_definitions().find(|ty| ty.name() == original.name()).unwrap();
            assert_eq!(&normalize_type_definition(original.clone()), normalized);

            let mut before = field_names_of(original);
            let mut after = field_names_of(normalized);
            before.sort();
            after.sort();
            assert_eq!(before, after);
        }
    }

    fn field_names_of(type_definition: &TypeDefinition) -> Vec<&str> {
        match type_definition {
            TypeDefinition::Object(object) => object.fields.iter().map(|field| field.name.as_str()).collect(),
            TypeDefinition::InputObject(input) => input.fields.iter().map(|field| field.name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn empty_document() {
        assert_eq!(normalize(Document::default()), Document::default());
    }
}
