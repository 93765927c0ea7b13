//! Conversion from GraphQL text to [`Document`], on top of `graphql-parser`.

use graphql_parser::{query, schema};

use crate::{document::*, Error};

/// Parse type system SDL into a [`Document`]. `extend ...` definitions are kept as
/// opaque [`TypeSystemExtension`]s.
pub fn parse_schema(sdl: &str) -> crate::Result<Document> {
    if sdl.trim().is_empty() {
        return Ok(Document::default());
    }

    let parsed = graphql_parser::parse_schema::<String>(sdl).map_err(|err| Error::Parse(err.to_string()))?;

    let definitions = parsed
        .definitions
        .into_iter()
        .map(|definition| match definition {
            schema::Definition::SchemaDefinition(schema_definition) => {
                Definition::from(convert_schema_definition(schema_definition))
            }
            schema::Definition::TypeDefinition(type_definition) => {
                Definition::from(convert_type_definition(type_definition))
            }
            schema::Definition::DirectiveDefinition(directive_definition) => {
                Definition::from(convert_directive_definition(directive_definition))
            }
            schema::Definition::TypeExtension(extension) => Definition::from(TypeSystemExtension {
                name: Some(extension_name(&extension).to_owned()),
                source: extension.to_string().trim_end().to_owned(),
            }),
        })
        .collect();

    Ok(Document::new(definitions))
}

/// Parse operations and fragments into a [`Document`] of [`ExecutableDefinition`]s.
pub fn parse_executable(source: &str) -> crate::Result<Document> {
    let parsed = graphql_parser::parse_query::<String>(source).map_err(|err| Error::Parse(err.to_string()))?;

    let definitions = parsed
        .definitions
        .into_iter()
        .map(|definition| {
            let name = match &definition {
                query::Definition::Operation(query::OperationDefinition::Query(query)) => query.name.clone(),
                query::Definition::Operation(query::OperationDefinition::Mutation(mutation)) => mutation.name.clone(),
                query::Definition::Operation(query::OperationDefinition::Subscription(subscription)) => {
                    subscription.name.clone()
                }
                query::Definition::Operation(query::OperationDefinition::SelectionSet(_)) => None,
                query::Definition::Fragment(fragment) => Some(fragment.name.clone()),
            };

            Definition::from(ExecutableDefinition {
                name,
                source: definition.to_string().trim_end().to_owned(),
            })
        })
        .collect();

    Ok(Document::new(definitions))
}

fn extension_name<'a>(extension: &'a schema::TypeExtension<'_, String>) -> &'a str {
    match extension {
        schema::TypeExtension::Scalar(scalar) => scalar.name.as_str(),
        schema::TypeExtension::Object(object) => object.name.as_str(),
        schema::TypeExtension::Interface(interface) => interface.name.as_str(),
        schema::TypeExtension::Union(union) => union.name.as_str(),
        schema::TypeExtension::Enum(r#enum) => r#enum.name.as_str(),
        schema::TypeExtension::InputObject(input_object) => input_object.name.as_str(),
    }
}

fn convert_schema_definition(definition: schema::SchemaDefinition<'_, String>) -> SchemaDefinition {
    SchemaDefinition {
        description: None,
        directives: convert_directives(definition.directives),
        query: definition.query,
        mutation: definition.mutation,
        subscription: definition.subscription,
    }
}

fn convert_directive_definition(definition: schema::DirectiveDefinition<'_, String>) -> DirectiveDefinition {
    DirectiveDefinition {
        description: definition.description,
        name: definition.name,
        arguments: definition.arguments.into_iter().map(convert_input_value).collect(),
        repeatable: definition.repeatable,
        locations: definition
            .locations
            .iter()
            .map(|location| location.as_str().to_owned())
            .collect(),
    }
}

fn convert_type_definition(definition: schema::TypeDefinition<'_, String>) -> TypeDefinition {
    match definition {
        schema::TypeDefinition::Scalar(scalar) => TypeDefinition::Scalar(ScalarTypeDefinition {
            description: scalar.description,
            name: scalar.name,
            directives: convert_directives(scalar.directives),
        }),
        schema::TypeDefinition::Object(object) => TypeDefinition::Object(ObjectTypeDefinition {
            description: object.description,
            name: object.name,
            implements: object.implements_interfaces,
            directives: convert_directives(object.directives),
            fields: object.fields.into_iter().map(convert_field).collect(),
        }),
        schema::TypeDefinition::Interface(interface) => TypeDefinition::Interface(InterfaceTypeDefinition {
            description: interface.description,
            name: interface.name,
            implements: interface.implements_interfaces,
            directives: convert_directives(interface.directives),
            fields: interface.fields.into_iter().map(convert_field).collect(),
        }),
        schema::TypeDefinition::Union(union) => TypeDefinition::Union(UnionTypeDefinition {
            description: union.description,
            name: union.name,
            directives: convert_directives(union.directives),
            members: union.types,
        }),
        schema::TypeDefinition::Enum(r#enum) => TypeDefinition::Enum(EnumTypeDefinition {
            description: r#enum.description,
            name: r#enum.name,
            directives: convert_directives(r#enum.directives),
            values: r#enum
                .values
                .into_iter()
                .map(|value| EnumValueDefinition {
                    description: value.description,
                    name: value.name,
                    directives: convert_directives(value.directives),
                })
                .collect(),
        }),
        schema::TypeDefinition::InputObject(input_object) => TypeDefinition::InputObject(InputObjectTypeDefinition {
            description: input_object.description,
            name: input_object.name,
            directives: convert_directives(input_object.directives),
            fields: input_object.fields.into_iter().map(convert_input_value).collect(),
        }),
    }
}

fn convert_field(field: schema::Field<'_, String>) -> FieldDefinition {
    FieldDefinition {
        description: field.description,
        name: field.name,
        arguments: field.arguments.into_iter().map(convert_input_value).collect(),
        ty: convert_type(field.field_type),
        directives: convert_directives(field.directives),
    }
}

fn convert_input_value(input_value: schema::InputValue<'_, String>) -> InputValueDefinition {
    InputValueDefinition {
        description: input_value.description,
        name: input_value.name,
        ty: convert_type(input_value.value_type),
        default_value: input_value.default_value.map(convert_value),
        directives: convert_directives(input_value.directives),
    }
}

fn convert_type(ty: schema::Type<'_, String>) -> Type {
    match ty {
        schema::Type::NamedType(name) => Type::Named(name),
        schema::Type::ListType(inner) => Type::List(Box::new(convert_type(*inner))),
        schema::Type::NonNullType(inner) => Type::NonNull(Box::new(convert_type(*inner))),
    }
}

fn convert_directives(directives: Vec<schema::Directive<'_, String>>) -> Vec<Directive> {
    directives
        .into_iter()
        .map(|directive| Directive {
            name: directive.name,
            arguments: directive
                .arguments
                .into_iter()
                .map(|(name, value)| (name, convert_value(value)))
                .collect(),
        })
        .collect()
}

fn convert_value(value: schema::Value<'_, String>) -> Value {
    match value {
        schema::Value::Variable(name) => Value::Variable(name),
        schema::Value::Int(number) => number.as_i64().map_or(Value::Null, Value::Int),
        schema::Value::Float(float) => Value::Float(float),
        schema::Value::String(string) => Value::String(string),
        schema::Value::Boolean(boolean) => Value::Boolean(boolean),
        schema::Value::Null => Value::Null,
        schema::Value::Enum(name) => Value::Enum(name),
        schema::Value::List(values) => Value::List(values.into_iter().map(convert_value).collect()),
        schema::Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(name, value)| (name, convert_value(value)))
                .collect(),
        ),
    }
}
