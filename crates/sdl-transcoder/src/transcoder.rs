use crate::{
    config::RenderConfig,
    document::Document,
    extends::{additional_types, extension_type_names},
    normalize::normalize,
    render::RenderableSchema,
    schema::{BuildSchema, SchemaBuilder},
};

/// Renders `document` as SDL with the default [`SchemaBuilder`] and [`RenderConfig`].
pub fn to_sdl(document: Document) -> crate::Result<String> {
    Transcoder::<SchemaBuilder>::default().to_sdl(document)
}

/// Renders `document` as SDL, resolving it with `builder`.
pub fn to_sdl_with(document: Document, builder: &impl BuildSchema) -> crate::Result<String> {
    render_sdl(document, builder, &RenderConfig::default())
}

/// Document to SDL conversion with an explicit schema builder and render configuration.
#[derive(Debug, Clone, Default)]
pub struct Transcoder<B = SchemaBuilder> {
    builder: B,
    config: RenderConfig,
}

impl<B: BuildSchema> Transcoder<B> {
    pub fn new(builder: B, config: RenderConfig) -> Self {
        Transcoder { builder, config }
    }

    pub fn to_sdl(&self, document: Document) -> crate::Result<String> {
        render_sdl(document, &self.builder, &self.config)
    }
}

fn render_sdl(document: Document, builder: &impl BuildSchema, config: &RenderConfig) -> crate::Result<String> {
    if !document.has_type_system_definitions() {
        tracing::debug!("no type system definitions, rendering an empty schema");
        return Ok(RenderableSchema::default().render(config)?);
    }

    let document = normalize(document);
    tracing::debug!(definitions = document.definitions.len(), "normalized document");

    let schema = builder.build_schema(&document).inspect_err(|err| {
        tracing::warn!(%err, "could not resolve the document into a schema");
    })?;

    let Some(schema) = schema else {
        tracing::debug!("no query root, rendering an empty schema");
        return Ok(RenderableSchema::default().render(config)?);
    };

    let names = extension_type_names(&document);
    let additional = additional_types(&schema, &names);
    tracing::debug!(
        references = names.len(),
        additional_types = additional.len(),
        "resolved @extends types"
    );

    let directives = document
        .schema_definition()
        .map(|schema_definition| schema_definition.directives.clone())
        .unwrap_or_default();

    let sdl = RenderableSchema::from_schema(&schema)
        .with_directives(directives)
        .with_directive_definitions(document.directive_definitions().cloned())
        .with_types(additional)
        .render(config)?;

    Ok(sdl)
}
