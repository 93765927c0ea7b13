use std::fmt;

use crate::schema::BuildError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not parse GraphQL document: {0}")]
    Parse(String),
    #[error("document could not be resolved into a schema: {0}")]
    SchemaResolutionFailed(#[from] BuildError),
    #[error("invalid render configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("could not render SDL")]
    Render(#[from] fmt::Error),
}
