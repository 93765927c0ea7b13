//! Resolution of a [`Document`] into a [`Schema`]: root operation types plus a flat
//! pool of every type known by name.

use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::{
    display_utils::BUILTIN_SCALARS,
    document::*,
    normalize::{compare_type_definitions, normalize_type_definition},
};

/// Builds a [`Schema`] out of a document.
///
/// `Ok(None)` means there is nothing to build (no query root), an error means
/// the document cannot be resolved into a schema.
pub trait BuildSchema {
    fn build_schema(&self, document: &Document) -> Result<Option<Schema>, BuildError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("the {operation} root type `{name}` is not defined")]
    UnknownRootType { operation: RootOperation, name: String },
    #[error("the {operation} root type `{name}` must be an object type")]
    RootNotAnObject { operation: RootOperation, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootOperation {
    Query,
    Mutation,
    Subscription,
}

impl RootOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            RootOperation::Query => "query",
            RootOperation::Mutation => "mutation",
            RootOperation::Subscription => "subscription",
        }
    }

    fn default_type_name(self) -> &'static str {
        match self {
            RootOperation::Query => "Query",
            RootOperation::Mutation => "Mutation",
            RootOperation::Subscription => "Subscription",
        }
    }
}

impl std::fmt::Display for RootOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub query: ObjectTypeDefinition,
    pub mutation: Option<ObjectTypeDefinition>,
    pub subscription: Option<ObjectTypeDefinition>,
    /// Every type of the document, followed by the upstream types the document
    /// does not define.
    pub types: Vec<TypeDefinition>,
}

impl Schema {
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|ty| ty.name() == name)
    }

    /// The types reachable from the query and mutation roots, roots included, in
    /// canonical order. Objects implementing a reachable interface are part of the
    /// graph. Built-in scalars never are.
    pub fn reachable_types(&self) -> Vec<&TypeDefinition> {
        let roots = [Some(&self.query), self.mutation.as_ref()]
            .into_iter()
            .flatten()
            .map(|root| root.name.as_str());

        self.reachable_from(roots)
    }

    /// Same walk as [`Schema::reachable_types`], starting from the named types.
    /// Names missing from the pool are skipped.
    pub fn reachable_from<'a>(&'a self, names: impl IntoIterator<Item = &'a str>) -> Vec<&'a TypeDefinition> {
        let by_name: HashMap<&str, &TypeDefinition> = self.types.iter().map(|ty| (ty.name(), ty)).collect();

        let mut implementors: HashMap<&str, Vec<&str>> = HashMap::new();
        for ty in &self.types {
            if let TypeDefinition::Object(object) = ty {
                for interface in &object.implements {
                    implementors.entry(interface.as_str()).or_default().push(object.name.as_str());
                }
            }
        }

        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<&str> = names.into_iter().collect();

        while let Some(name) = queue.pop_front() {
            if BUILTIN_SCALARS.contains(&name) || !seen.insert(name) {
                continue;
            }

            let Some(&ty) = by_name.get(name) else {
                continue;
            };

            queue.extend(referenced_types(ty));

            if let Some(implementors) = implementors.get(name) {
                queue.extend(implementors.iter().copied());
            }
        }

        let mut reachable: Vec<&TypeDefinition> = seen
            .into_iter()
            .filter_map(|name| by_name.get(name).copied())
            .collect();
        reachable.sort_by(|a, b| compare_type_definitions(a, b));
        reachable
    }
}

fn referenced_types(ty: &TypeDefinition) -> Vec<&str> {
    fn input_values(values: &[InputValueDefinition]) -> impl Iterator<Item = &str> {
        values.iter().map(|value| value.ty.base_name())
    }

    fn fields(fields: &[FieldDefinition]) -> impl Iterator<Item = &str> {
        fields
            .iter()
            .flat_map(|field| std::iter::once(field.ty.base_name()).chain(input_values(&field.arguments)))
    }

    match ty {
        TypeDefinition::Scalar(_) | TypeDefinition::Enum(_) => Vec::new(),
        TypeDefinition::InputObject(input_object) => input_values(&input_object.fields).collect(),
        TypeDefinition::Object(object) => object
            .implements
            .iter()
            .map(String::as_str)
            .chain(fields(&object.fields))
            .collect(),
        TypeDefinition::Interface(interface) => interface
            .implements
            .iter()
            .map(String::as_str)
            .chain(fields(&interface.fields))
            .collect(),
        TypeDefinition::Union(union) => union.members.iter().map(String::as_str).collect(),
    }
}

/// The default [`BuildSchema`] implementation.
///
/// It carries the upstream type pool explicitly: types resolved from other
/// sources, which the document may reference without defining them.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    upstream: Vec<TypeDefinition>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        SchemaBuilder::default()
    }

    /// Registers upstream types. Their fields are sorted like a normalized document's.
    #[must_use]
    pub fn with_upstream_types(mut self, types: impl IntoIterator<Item = TypeDefinition>) -> Self {
        self.upstream.extend(types.into_iter().map(normalize_type_definition));
        self
    }

    /// Registers the type definitions of an upstream SDL source.
    pub fn with_upstream_sdl(self, sdl: &str) -> crate::Result<Self> {
        let document = crate::parse::parse_schema(sdl)?;
        let types = document.type_definitions().cloned().collect::<Vec<_>>();

        tracing::debug!(count = types.len(), "registered upstream types");

        Ok(self.with_upstream_types(types))
    }

    fn resolve_root<'a>(
        types: &'a [TypeDefinition],
        operation: RootOperation,
        declared: Option<&str>,
    ) -> Result<Option<&'a ObjectTypeDefinition>, BuildError> {
        let name = declared.unwrap_or(operation.default_type_name());

        match types.iter().find(|ty| ty.name() == name) {
            Some(TypeDefinition::Object(object)) => Ok(Some(object)),
            Some(_) if declared.is_some() => Err(BuildError::RootNotAnObject {
                operation,
                name: name.to_owned(),
            }),
            None if declared.is_some() => Err(BuildError::UnknownRootType {
                operation,
                name: name.to_owned(),
            }),
            _ => Ok(None),
        }
    }
}

impl BuildSchema for SchemaBuilder {
    fn build_schema(&self, document: &Document) -> Result<Option<Schema>, BuildError> {
        let mut types: Vec<TypeDefinition> = document.type_definitions().cloned().collect();
        let defined: BTreeSet<String> = types.iter().map(|ty| ty.name().to_owned()).collect();

        types.extend(
            self.upstream
                .iter()
                .filter(|ty| !defined.contains(ty.name()))
                .cloned(),
        );

        let schema_definition = document.schema_definition();
        let declared = |operation: RootOperation| {
            schema_definition.and_then(|schema| match operation {
                RootOperation::Query => schema.query.as_deref(),
                RootOperation::Mutation => schema.mutation.as_deref(),
                RootOperation::Subscription => schema.subscription.as_deref(),
            })
        };

        let query = Self::resolve_root(&types, RootOperation::Query, declared(RootOperation::Query))?;
        let mutation = Self::resolve_root(&types, RootOperation::Mutation, declared(RootOperation::Mutation))?;
        // Never rendered, so an unresolvable subscription root is dropped.
        let subscription = Self::resolve_root(
            &types,
            RootOperation::Subscription,
            declared(RootOperation::Subscription),
        )
        .unwrap_or_else(|err| {
            tracing::debug!(%err, "ignoring the subscription root");
            None
        });

        let Some(query) = query.cloned() else {
            return Ok(None);
        };

        Ok(Some(Schema {
            query,
            mutation: mutation.cloned(),
            subscription: subscription.cloned(),
            types,
        }))
    }
}
