use std::fmt::{self, Display, Write};

use crate::{
    config::RenderConfig,
    display_utils::{Description, Joined, BUILTIN_SCALARS},
    document::*,
    normalize::compare_type_definitions,
    schema::Schema,
};

/// A schema ready to be rendered as SDL: root operations, schema directives,
/// directive definitions and the types to print.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderableSchema {
    query: Option<String>,
    mutation: Option<String>,
    subscription: Option<String>,
    directives: Vec<Directive>,
    directive_definitions: Vec<DirectiveDefinition>,
    types: Vec<TypeDefinition>,
}

impl RenderableSchema {
    /// The query and mutation roots of `schema` with every type reachable from them.
    pub fn from_schema(schema: &Schema) -> Self {
        RenderableSchema {
            query: Some(schema.query.name.clone()),
            mutation: schema.mutation.as_ref().map(|mutation| mutation.name.clone()),
            ..Default::default()
        }
        .with_types(schema.reachable_types().into_iter().cloned())
    }

    #[must_use]
    pub fn with_directives(mut self, directives: impl IntoIterator<Item = Directive>) -> Self {
        self.directives.extend(directives);
        self
    }

    #[must_use]
    pub fn with_directive_definitions(mut self, definitions: impl IntoIterator<Item = DirectiveDefinition>) -> Self {
        self.directive_definitions.extend(definitions);
        self
    }

    /// Adds types to render. A type whose name is already present is skipped.
    #[must_use]
    pub fn with_types(mut self, types: impl IntoIterator<Item = TypeDefinition>) -> Self {
        for ty in types {
            if self.types.iter().all(|existing| existing.name() != ty.name()) {
                self.types.push(ty);
            }
        }

        self.types.sort_by(compare_type_definitions);
        self
    }

    pub fn types(&self) -> &[TypeDefinition] {
        &self.types
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.mutation.is_none()
            && self.subscription.is_none()
            && self.directives.is_empty()
            && self.directive_definitions.is_empty()
            && self.types.is_empty()
    }

    /// Renders the SDL text. Blocks are separated by a blank line and the output
    /// ends with a single newline, unless there is nothing to render at all.
    pub fn render(&self, config: &RenderConfig) -> Result<String, fmt::Error> {
        let mut sdl = String::new();

        write!(
            sdl,
            "{}",
            Renderer {
                schema: self,
                config,
                indent: config.indentation(),
            }
        )?;

        Ok(sdl)
    }
}

struct Renderer<'a> {
    schema: &'a RenderableSchema,
    config: &'a RenderConfig,
    indent: String,
}

impl Display for Renderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schema = self.schema;
        let mut write_leading_whitespace = {
            let mut first_block = true;
            move |f: &mut fmt::Formatter<'_>| {
                if first_block {
                    first_block = false;
                    Ok(())
                } else {
                    f.write_char('\n')
                }
            }
        };

        for definition in &schema.directive_definitions {
            write_leading_whitespace(f)?;
            self.write_directive_definition(f, definition)?;
        }

        if schema.query.is_some() || schema.mutation.is_some() || !schema.directives.is_empty() {
            write_leading_whitespace(f)?;
            self.write_schema_block(f)?;
        }

        for ty in &schema.types {
            if matches!(ty, TypeDefinition::Scalar(scalar) if BUILTIN_SCALARS.contains(&scalar.name.as_str())) {
                continue;
            }

            write_leading_whitespace(f)?;
            self.write_type_definition(f, ty)?;
        }

        Ok(())
    }
}

impl Renderer<'_> {
    fn write_description(&self, f: &mut fmt::Formatter<'_>, description: Option<&str>, indent: &str) -> fmt::Result {
        match description {
            Some(description) if self.config.descriptions => Description(description, indent).fmt(f),
            _ => Ok(()),
        }
    }

    fn write_directive_definition(&self, f: &mut fmt::Formatter<'_>, definition: &DirectiveDefinition) -> fmt::Result {
        self.write_description(f, definition.description.as_deref(), "")?;

        write!(f, "directive @{}", definition.name)?;
        self.write_arguments(f, &definition.arguments, "")?;

        if definition.repeatable {
            f.write_str(" repeatable")?;
        }

        writeln!(f, " on {}", Joined(&definition.locations, " | "))
    }

    fn write_schema_block(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let RenderableSchema {
            query,
            mutation,
            subscription,
            directives,
            ..
        } = self.schema;

        write!(f, "schema{}", Directives(directives))?;

        let roots = [("query", query), ("mutation", mutation), ("subscription", subscription)];

        if roots.iter().all(|(_, root)| root.is_none()) {
            return f.write_char('\n');
        }

        f.write_str(" {\n")?;

        for (operation, root) in roots {
            if let Some(root) = root {
                writeln!(f, "{}{operation}: {root}", self.indent)?;
            }
        }

        f.write_str("}\n")
    }

    fn write_type_definition(&self, f: &mut fmt::Formatter<'_>, ty: &TypeDefinition) -> fmt::Result {
        self.write_description(f, ty.description(), "")?;

        match ty {
            TypeDefinition::Scalar(scalar) => writeln!(f, "scalar {}{}", scalar.name, Directives(&scalar.directives)),
            TypeDefinition::Object(object) => self.write_fields_type(
                f,
                "type",
                &object.name,
                &object.implements,
                &object.directives,
                &object.fields,
            ),
            TypeDefinition::Interface(interface) => self.write_fields_type(
                f,
                "interface",
                &interface.name,
                &interface.implements,
                &interface.directives,
                &interface.fields,
            ),
            TypeDefinition::InputObject(input_object) => {
                write!(f, "input {}{}", input_object.name, Directives(&input_object.directives))?;

                if input_object.fields.is_empty() {
                    return f.write_char('\n');
                }

                f.write_str(" {\n")?;
                for field in &input_object.fields {
                    self.write_description(f, field.description.as_deref(), &self.indent)?;
                    f.write_str(&self.indent)?;
                    write_input_value(f, field)?;
                    f.write_char('\n')?;
                }
                f.write_str("}\n")
            }
            TypeDefinition::Enum(r#enum) => {
                write!(f, "enum {}{}", r#enum.name, Directives(&r#enum.directives))?;

                if r#enum.values.is_empty() {
                    return f.write_char('\n');
                }

                f.write_str(" {\n")?;
                for value in &r#enum.values {
                    self.write_description(f, value.description.as_deref(), &self.indent)?;
                    writeln!(f, "{}{}{}", self.indent, value.name, Directives(&value.directives))?;
                }
                f.write_str("}\n")
            }
            TypeDefinition::Union(union) => {
                write!(f, "union {}{}", union.name, Directives(&union.directives))?;

                if !union.members.is_empty() {
                    write!(f, " = {}", Joined(&union.members, " | "))?;
                }

                f.write_char('\n')
            }
        }
    }

    fn write_fields_type(
        &self,
        f: &mut fmt::Formatter<'_>,
        keyword: &str,
        name: &str,
        implements: &[String],
        directives: &[Directive],
        fields: &[FieldDefinition],
    ) -> fmt::Result {
        write!(f, "{keyword} {name}")?;

        if !implements.is_empty() {
            write!(f, " implements {}", Joined(implements, " & "))?;
        }

        Directives(directives).fmt(f)?;

        if fields.is_empty() {
            return f.write_char('\n');
        }

        f.write_str(" {\n")?;
        for field in fields {
            self.write_description(f, field.description.as_deref(), &self.indent)?;
            write!(f, "{}{}", self.indent, field.name)?;
            self.write_arguments(f, &field.arguments, &self.indent)?;
            writeln!(f, ": {}{}", field.ty, Directives(&field.directives))?;
        }
        f.write_str("}\n")
    }

    /// Arguments on one line, or one per line when any of them has a rendered description.
    fn write_arguments(
        &self,
        f: &mut fmt::Formatter<'_>,
        arguments: &[InputValueDefinition],
        indent: &str,
    ) -> fmt::Result {
        if arguments.is_empty() {
            return Ok(());
        }

        let multiline = self.config.descriptions && arguments.iter().any(|argument| argument.description.is_some());

        if !multiline {
            f.write_char('(')?;
            let mut arguments = arguments.iter().peekable();

            while let Some(argument) = arguments.next() {
                write_input_value(f, argument)?;

                if arguments.peek().is_some() {
                    f.write_str(", ")?;
                }
            }

            return f.write_char(')');
        }

        let nested = format!("{indent}{}", self.indent);

        f.write_str("(\n")?;
        for argument in arguments {
            self.write_description(f, argument.description.as_deref(), &nested)?;
            f.write_str(&nested)?;
            write_input_value(f, argument)?;
            f.write_char('\n')?;
        }
        write!(f, "{indent})")
    }
}

fn write_input_value(f: &mut fmt::Formatter<'_>, input_value: &InputValueDefinition) -> fmt::Result {
    write!(f, "{}: {}", input_value.name, input_value.ty)?;

    if let Some(default_value) = &input_value.default_value {
        write!(f, " = {default_value}")?;
    }

    Directives(&input_value.directives).fmt(f)
}

/// Directive applications, each preceded by a space.
struct Directives<'a>(&'a [Directive]);

impl Display for Directives<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for directive in self.0 {
            write!(f, " @{}", directive.name)?;

            if directive.arguments.is_empty() {
                continue;
            }

            f.write_char('(')?;
            let mut arguments = directive.arguments.iter().peekable();

            while let Some((name, value)) = arguments.next() {
                write!(f, "{name}: {value}")?;

                if arguments.peek().is_some() {
                    f.write_str(", ")?;
                }
            }

            f.write_char(')')?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        normalize::normalize,
        parse::parse_schema,
        schema::{BuildSchema, SchemaBuilder},
    };

    fn render(sdl: &str, config: &RenderConfig) -> String {
        let document = normalize(parse_schema(sdl).unwrap());
        let schema = SchemaBuilder::new().build_schema(&document).unwrap().unwrap();

        RenderableSchema::from_schema(&schema)
            .with_directive_definitions(document.directive_definitions().cloned())
            .with_directives(document.schema_definition().map(|schema| schema.directives.clone()).unwrap_or_default())
            .render(config)
            .unwrap()
    }

    #[test]
    fn empty_schema_renders_nothing() {
        let schema = RenderableSchema::default();

        assert!(schema.is_empty());
        assert_eq!(schema.render(&RenderConfig::default()).unwrap(), "");
    }

    #[test]
    fn every_kind_of_definition() {
        let actual = render(
            indoc! {r#"
                schema @server(port: 8000) { query: Query mutation: Mutation }

                "Cache the field"
                directive @cached(
                  "seconds"
                  ttl: Int = 60
                ) repeatable on FIELD_DEFINITION | OBJECT

                type Query {
                  search(term: String!, first: Int = 10): [SearchResult!]! @cached(ttl: 30)
                  node(id: ID!): Node
                  """
                  The current user.
                  """
                  me: User
                }

                type Mutation { updateUser(input: UserInput!): User }

                interface Node { id: ID! }

                """
                A person.
                """
                type User implements Node @key(fields: "id") {
                  role: Role
                  name: String @deprecated(reason: "use \"fullName\"")
                  id: ID!
                  createdAt: DateTime
                }

                type Post { id: ID! }

                union SearchResult = User | Post

                enum Role { ADMIN @deprecated USER }

                input UserInput { tags: [String!] = ["a", "b"] name: String }

                scalar DateTime @specifiedBy(url: "https://example.com/datetime")
            "#},
            &RenderConfig::default(),
        );

        let expected = expect![[r#"
            """
            Cache the field
            """
            directive @cached(
              """
              seconds
              """
              ttl: Int = 60
            ) repeatable on FIELD_DEFINITION | OBJECT

            schema @server(port: 8000) {
              query: Query
              mutation: Mutation
            }

            interface Node {
              id: ID!
            }

            enum Role {
              ADMIN @deprecated
              USER
            }

            union SearchResult = User | Post

            scalar DateTime @specifiedBy(url: "https://example.com/datetime")

            input UserInput {
              name: String
              tags: [String!] = ["a", "b"]
            }

            type Mutation {
              updateUser(input: UserInput!): User
            }

            type Post {
              id: ID!
            }

            type Query {
              """
              The current user.
              """
              me: User
              node(id: ID!): Node
              search(term: String!, first: Int = 10): [SearchResult!]! @cached(ttl: 30)
            }

            """
            A person.
            """
            type User implements Node @key(fields: "id") {
              createdAt: DateTime
              id: ID!
              name: String @deprecated(reason: "use \"fullName\"")
              role: Role
            }
        "#]];

        expected.assert_eq(&actual);
    }

    #[test]
    fn configured_indentation_without_descriptions() {
        let config = RenderConfig {
            indent: 4,
            descriptions: false,
        };

        let actual = render(
            indoc! {r#"
                type Query {
                  "documented"
                  field(
                    "also documented"
                    arg: Int
                  ): Int
                }
            "#},
            &config,
        );

        let expected = expect![[r#"
            schema {
                query: Query
            }

            type Query {
                field(arg: Int): Int
            }
        "#]];

        expected.assert_eq(&actual);
    }

    #[test]
    fn duplicate_types_are_skipped() {
        let schema = RenderableSchema::default()
            .with_types(parse_schema("type B { a: Int } scalar A").unwrap().type_definitions().cloned())
            .with_types(parse_schema("type B { b: Int }").unwrap().type_definitions().cloned());

        let names: Vec<_> = schema.types().iter().map(TypeDefinition::name).collect();

        assert_eq!(names, ["A", "B"]);
        assert_eq!(schema.types()[1].as_object().unwrap().fields[0].name, "a");
    }
}
