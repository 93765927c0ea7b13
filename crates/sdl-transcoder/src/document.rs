mod ty;
mod value;

pub use self::{ty::Type, value::Value};

use indexmap::IndexMap;

/// A GraphQL document: a sequence of top-level definitions.
///
/// The order of `definitions` only carries meaning once the document went
/// through [`crate::normalize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    pub fn new(definitions: Vec<Definition>) -> Self {
        Document { definitions }
    }

    /// Parse SDL text. See [`crate::parse::parse_schema`].
    pub fn from_sdl(sdl: &str) -> crate::Result<Self> {
        crate::parse::parse_schema(sdl)
    }

    pub fn schema_definition(&self) -> Option<&SchemaDefinition> {
        self.definitions.iter().find_map(|definition| match definition {
            Definition::TypeSystem(TypeSystemDefinition::Schema(schema)) => Some(schema),
            _ => None,
        })
    }

    pub fn type_definitions(&self) -> impl Iterator<Item = &TypeDefinition> + '_ {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::TypeSystem(TypeSystemDefinition::Type(type_definition)) => Some(type_definition),
            _ => None,
        })
    }

    pub fn directive_definitions(&self) -> impl Iterator<Item = &DirectiveDefinition> + '_ {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::TypeSystem(TypeSystemDefinition::Directive(directive)) => Some(directive),
            _ => None,
        })
    }

    pub fn object_types(&self) -> impl Iterator<Item = &ObjectTypeDefinition> + '_ {
        self.type_definitions().filter_map(|type_definition| match type_definition {
            TypeDefinition::Object(object) => Some(object),
            _ => None,
        })
    }

    pub fn has_type_system_definitions(&self) -> bool {
        self.definitions
            .iter()
            .any(|definition| matches!(definition, Definition::TypeSystem(_)))
    }
}

impl Extend<Definition> for Document {
    fn extend<T: IntoIterator<Item = Definition>>(&mut self, iter: T) {
        self.definitions.extend(iter)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Executable(ExecutableDefinition),
    TypeSystemExtension(TypeSystemExtension),
    TypeSystem(TypeSystemDefinition),
}

/// An operation or a fragment. Kept as canonical text, never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableDefinition {
    pub name: Option<String>,
    pub source: String,
}

/// An `extend ...` definition. Kept as canonical text, never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSystemExtension {
    pub name: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeSystemDefinition {
    Directive(DirectiveDefinition),
    Schema(SchemaDefinition),
    Type(TypeDefinition),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    Scalar(ScalarTypeDefinition),
    InputObject(InputObjectTypeDefinition),
    Object(ObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Enum(EnumTypeDefinition),
    Union(UnionTypeDefinition),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Scalar(scalar) => &scalar.name,
            TypeDefinition::InputObject(input_object) => &input_object.name,
            TypeDefinition::Object(object) => &object.name,
            TypeDefinition::Interface(interface) => &interface.name,
            TypeDefinition::Enum(r#enum) => &r#enum.name,
            TypeDefinition::Union(union) => &union.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            TypeDefinition::Scalar(scalar) => scalar.description.as_deref(),
            TypeDefinition::InputObject(input_object) => input_object.description.as_deref(),
            TypeDefinition::Object(object) => object.description.as_deref(),
            TypeDefinition::Interface(interface) => interface.description.as_deref(),
            TypeDefinition::Enum(r#enum) => r#enum.description.as_deref(),
            TypeDefinition::Union(union) => union.description.as_deref(),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectTypeDefinition> {
        match self {
            TypeDefinition::Object(object) => Some(object),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition {
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveDefinition {
    pub description: Option<String>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub fields: Vec<InputValueDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub implements: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
}

impl ObjectTypeDefinition {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        ObjectTypeDefinition {
            description: None,
            name: name.into(),
            implements: Vec::new(),
            directives: Vec::new(),
            fields,
        }
    }

    #[must_use]
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    /// The first directive with the given name, if any.
    pub fn directive(&self, name: &str) -> Option<&Directive> {
        self.directives.iter().find(|directive| directive.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub implements: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub values: Vec<EnumValueDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub description: Option<String>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub ty: Type,
    pub directives: Vec<Directive>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        FieldDefinition {
            description: None,
            name: name.into(),
            arguments: Vec::new(),
            ty,
            directives: Vec::new(),
        }
    }
}

/// An argument, an input object field or a directive definition argument.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub description: Option<String>,
    pub name: String,
    pub ty: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

impl InputValueDefinition {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        InputValueDefinition {
            description: None,
            name: name.into(),
            ty,
            default_value: None,
            directives: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: IndexMap<String, Value>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Directive {
            name: name.into(),
            arguments: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_argument(mut self, name: impl Into<String>, value: Value) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }
}

macro_rules! impl_from_type_definition {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for TypeDefinition {
                fn from(value: $ty) -> Self {
                    TypeDefinition::$variant(value)
                }
            }

            impl From<$ty> for Definition {
                fn from(value: $ty) -> Self {
                    Definition::from(TypeDefinition::$variant(value))
                }
            }
        )*
    };
}

impl_from_type_definition! {
    Scalar => ScalarTypeDefinition,
    InputObject => InputObjectTypeDefinition,
    Object => ObjectTypeDefinition,
    Interface => InterfaceTypeDefinition,
    Enum => EnumTypeDefinition,
    Union => UnionTypeDefinition,
}

impl From<TypeDefinition> for Definition {
    fn from(value: TypeDefinition) -> Self {
        Definition::TypeSystem(TypeSystemDefinition::Type(value))
    }
}

impl From<SchemaDefinition> for Definition {
    fn from(value: SchemaDefinition) -> Self {
        Definition::TypeSystem(TypeSystemDefinition::Schema(value))
    }
}

impl From<DirectiveDefinition> for Definition {
    fn from(value: DirectiveDefinition) -> Self {
        Definition::TypeSystem(TypeSystemDefinition::Directive(value))
    }
}

impl From<ExecutableDefinition> for Definition {
    fn from(value: ExecutableDefinition) -> Self {
        Definition::Executable(value)
    }
}

impl From<TypeSystemExtension> for Definition {
    fn from(value: TypeSystemExtension) -> Self {
        Definition::TypeSystemExtension(value)
    }
}
