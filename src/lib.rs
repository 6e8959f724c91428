//! # adoc
//!
//! A parser for an Asciidoc-like lightweight markup language.
//!
//! This crate wires the layered configuration of [`adoc_config`] into the parsing engine of
//! [`adoc_parser`]:
//!
//!     parser.max_nesting_depth   bound on nested blocks
//!     parser.attributes.*        global attributes, looked up after the document's own
//!     include.enabled            whether `include::` reaches the filesystem at all
//!     include.base_dir           where relative include targets are read from
//!     include.encoding           encoding requested from the resolver
//!
//! A relative `base_dir` is taken from the working directory for [`parse_str`] and from the
//! document's directory for [`parse_file`].

use adoc_parser::adoc::loader::{DocumentLoader, LoaderError};
use adoc_parser::adoc::resolver::LocalContentResolver;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub use adoc_config::{load_defaults, AdocConfig, ConfigError, Loader as ConfigLoader};
pub use adoc_parser::adoc::ast::{Document, Options};
pub use adoc_parser::adoc::{Parser, ParserError};

#[derive(Debug, Error)]
pub enum AdocError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoaderError),
}

/// Build a parser from a configuration. Relative include directories are resolved against
/// `anchor` when there is one.
pub fn parser_from_config(config: &AdocConfig, anchor: Option<&Path>) -> Parser {
    let attributes = config
        .parser
        .attributes
        .iter()
        .fold(Options::new(), |options, (name, value)| options.with(name, value));
    let parser = Parser::new()
        .with_attributes(attributes)
        .with_max_depth(config.parser.max_nesting_depth)
        .with_include_encoding(config.include.encoding.clone());
    if !config.include.enabled {
        return parser;
    }

    let base_dir = match anchor {
        Some(anchor) if config.include.base_dir.is_relative() => {
            anchor.join(&config.include.base_dir)
        }
        _ => config.include.base_dir.clone(),
    };
    debug!(base_dir = %base_dir.display(), "includes enabled");
    parser.with_resolver(LocalContentResolver::new(base_dir))
}

pub fn parse_str(source: &str, config: &AdocConfig) -> Result<Document, AdocError> {
    let loader = DocumentLoader::from_string(source).with_parser(parser_from_config(config, None));
    Ok(loader.parse()?)
}

pub fn parse_file(path: impl AsRef<Path>, config: &AdocConfig) -> Result<Document, AdocError> {
    let path = path.as_ref();
    let anchor = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    let parser = parser_from_config(config, anchor);
    let loader = DocumentLoader::from_path(path)?.with_parser(parser);
    // with includes disabled the parser has no resolver, keep it that way
    let loader = if config.include.enabled {
        loader
    } else {
        loader.without_base_dir()
    };
    Ok(loader.parse()?)
}

/// Parse a file with the default configuration layered with an optional `adoc.toml` found
/// next to it.
pub fn parse_file_with_local_config(path: impl AsRef<Path>) -> Result<Document, AdocError> {
    let path = path.as_ref();
    let mut loader = ConfigLoader::new();
    if let Some(dir) = path.parent() {
        loader = loader.with_optional_file(dir.join("adoc.toml"));
    }
    let config = loader.build()?;
    parse_file(path, &config)
}
