//! # SDL transcoder
//!
//! Turns GraphQL schema documents into canonical SDL text. Two documents with the
//! same definitions render to the same bytes, whatever order the definitions were
//! declared, merged or generated in:
//!
//! - [`normalize`] sorts object and input object fields by name, then sorts the
//!   definitions by kind and name.
//! - [`to_sdl`] normalizes the document, resolves it into a schema, pulls in the
//!   upstream types named by `@extends(types: [...])` directives and renders the
//!   result.
//!
//! Parsing SDL text into a [`Document`] is available in [`parse`].

mod config;
mod display_utils;
mod error;
mod transcoder;

pub mod document;
pub mod extends;
pub mod normalize;
pub mod parse;
pub mod render;
pub mod schema;

pub use self::{
    config::{RenderConfig, MAX_INDENT},
    document::Document,
    error::{Error, Result},
    normalize::normalize,
    render::RenderableSchema,
    schema::{BuildError, BuildSchema, Schema, SchemaBuilder},
    transcoder::{to_sdl, to_sdl_with, Transcoder},
};

// Used by the integration tests only.
#[cfg(test)]
use {datatest_stable as _, miette as _, similar as _};
