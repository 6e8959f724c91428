//! Document loading utilities
//!
//! This module provides `DocumentLoader`, loading source text from files or strings and
//! parsing it. It is used by the facade crate and by tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use adoc_parser::adoc::loader::DocumentLoader;
//!
//! // From file, includes resolved next to the file
//! let doc = DocumentLoader::from_path("guide.adoc")?.parse()?;
//!
//! // From string
//! let doc = DocumentLoader::from_string("= Title\n\nHello\n").parse()?;
//!
//! // Serialized
//! let tree = DocumentLoader::from_string("Hello\n").serialize("treeviz")?;
//! ```

use crate::adoc::ast::Document;
use crate::adoc::error::ParserError;
use crate::adoc::formats::{FormatError, FormatRegistry};
use crate::adoc::resolver::LocalContentResolver;
use crate::adoc::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] Box<ParserError>),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Source text plus the parser to run on it
pub struct DocumentLoader {
    source: String,
    base_dir: Option<PathBuf>,
    parser: Parser,
}

impl DocumentLoader {
    /// Load from a file path. Unless the parser given later has its own resolver, includes are
    /// read relative to the file's directory.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = source.len(), "loaded document");
        Ok(DocumentLoader {
            source,
            base_dir: path.parent().map(Path::to_path_buf),
            parser: Parser::new(),
        })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
            base_dir: None,
            parser: Parser::new(),
        }
    }

    /// Forget the file's directory: includes only go through the parser's own resolver.
    pub fn without_base_dir(mut self) -> Self {
        self.base_dir = None;
        self
    }

    pub fn with_parser(mut self, parser: Parser) -> Self {
        self.parser = parser;
        self
    }

    fn effective_parser(&self) -> Parser {
        match &self.base_dir {
            Some(dir) if self.parser.resolver().is_none() => self
                .parser
                .clone()
                .with_resolver(LocalContentResolver::new(dir.clone())),
            _ => self.parser.clone(),
        }
    }

    pub fn parse(&self) -> Result<Document, LoaderError> {
        Ok(self.effective_parser().parse(&self.source)?)
    }

    /// Parse then serialize with one of the default formats
    pub fn serialize(&self, format: &str) -> Result<String, LoaderError> {
        let doc = self.parse()?;
        Ok(FormatRegistry::with_defaults().serialize(&doc, format)?)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adoc::ast::Element;
    use crate::adoc::resolver::InMemoryResolver;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn from_string() {
        let loader = DocumentLoader::from_string("Hello\n");
        assert_eq!(loader.source(), "Hello\n");
        assert_eq!(loader.base_dir(), None);
        let doc = loader.parse().unwrap();
        assert_eq!(doc.body.children, vec![Element::text("Hello")]);
    }

    #[test]
    fn from_path_resolves_includes_next_to_the_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("part.adoc"), "included\n").unwrap();
        let mut main = fs::File::create(dir.path().join("main.adoc")).unwrap();
        writeln!(main, "= Main\n\ninclude::part.adoc[]").unwrap();

        let loader = DocumentLoader::from_path(dir.path().join("main.adoc")).unwrap();
        assert_eq!(loader.base_dir(), Some(dir.path()));
        let doc = loader.parse().unwrap();
        assert_eq!(doc.header.title, "Main");
        assert_eq!(doc.body.children, vec![Element::text("included")]);
    }

    #[test]
    fn explicit_resolver_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.adoc"), "include::part.adoc[]").unwrap();
        fs::write(dir.path().join("part.adoc"), "from disk").unwrap();

        let parser =
            Parser::new().with_resolver(InMemoryResolver::new().with("part.adoc", "from memory"));
        let doc = DocumentLoader::from_path(dir.path().join("main.adoc"))
            .unwrap()
            .with_parser(parser)
            .parse()
            .unwrap();
        assert_eq!(doc.body.children, vec![Element::text("from memory")]);
    }

    #[test]
    fn without_base_dir_includes_need_a_resolver() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.adoc"), "include::part.adoc[]").unwrap();
        fs::write(dir.path().join("part.adoc"), "from disk").unwrap();

        let error = DocumentLoader::from_path(dir.path().join("main.adoc"))
            .unwrap()
            .without_base_dir()
            .parse()
            .unwrap_err();
        match error {
            LoaderError::Parse(error) => assert!(matches!(
                error.root_cause(),
                ParserError::NoResolver { .. }
            )),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let result = DocumentLoader::from_path(dir.path().join("absent.adoc"));
        assert!(matches!(result, Err(LoaderError::Io(_))));
    }

    #[test]
    fn parse_errors_are_wrapped() {
        let error = DocumentLoader::from_string("= T\n:a: 1\n[.lead]")
            .parse()
            .unwrap_err();
        assert!(matches!(error, LoaderError::Parse(_)));
        assert!(error.to_string().starts_with("Parse error:"));
    }

    #[test]
    fn serialize_by_format_name() {
        let loader = DocumentLoader::from_string("Hello");
        assert_eq!(loader.serialize("treeviz").unwrap(), "└─ ◦ Hello\n");
        assert!(matches!(
            loader.serialize("html"),
            Err(LoaderError::Format(FormatError::FormatNotFound(_)))
        ));
    }
}
