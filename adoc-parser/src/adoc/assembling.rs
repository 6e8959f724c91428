//! Document assembling
//!
//!     [`Parser`] is the entry point. It holds what every parse shares and never mutates: the
//!     global attributes, the content resolver and the nesting limit. A parse then runs in two
//!     steps over one [`Cursor`]:
//!
//!         1. The header (see [header]): title, author and revision lines, attribute
//!            declarations. Lines that can't belong to a header leave the cursor untouched.
//!         2. The body: the block dispatcher over the remaining lines, with the header
//!            attributes as the document layer of the attribute context.
//!
//!     Each parse owns its cursor and attribute context, so one `Parser` can be shared across
//!     threads and reused for any number of documents.

pub mod header;

use crate::adoc::ast::{Body, Document, Element, Options};
use crate::adoc::attributes::Attributes;
use crate::adoc::cursor::Cursor;
use crate::adoc::error::ParserResult;
use crate::adoc::parsing::engine::Engine;
use crate::adoc::resolver::ContentResolver;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Default bound on nested blocks.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parser configuration, cheap to clone
#[derive(Clone)]
pub struct Parser {
    globals: Arc<Options>,
    resolver: Option<Arc<dyn ContentResolver>>,
    max_depth: usize,
    include_encoding: Option<String>,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            globals: Arc::new(Options::new()),
            resolver: None,
            max_depth: DEFAULT_MAX_DEPTH,
            include_encoding: None,
        }
    }

    /// Global attributes, looked up after the document's own ones.
    pub fn with_attributes(mut self, attributes: Options) -> Self {
        self.globals = Arc::new(attributes);
        self
    }

    pub fn with_resolver(self, resolver: impl ContentResolver + 'static) -> Self {
        self.with_shared_resolver(Arc::new(resolver))
    }

    pub fn with_shared_resolver(mut self, resolver: Arc<dyn ContentResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Encoding passed to the resolver for includes without an `encoding` option.
    pub fn with_include_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.include_encoding = Some(encoding.into());
        self
    }

    pub fn globals(&self) -> &Arc<Options> {
        &self.globals
    }

    pub fn resolver(&self) -> Option<&dyn ContentResolver> {
        self.resolver.as_deref()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn include_encoding(&self) -> Option<&str> {
        self.include_encoding.as_deref()
    }

    /// Parse a whole document.
    pub fn parse(&self, source: &str) -> ParserResult<Document> {
        self.parse_cursor(Cursor::from_text(source))
    }

    pub fn parse_lines<I, S>(&self, lines: I) -> ParserResult<Document>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse_cursor(Cursor::from_lines(lines))
    }

    pub fn parse_cursor(&self, mut cursor: Cursor) -> ParserResult<Document> {
        let mut engine = Engine::new(self);
        let header = engine.parse_header(&mut cursor)?;
        let mut attributes =
            Attributes::with_values(header.attributes.clone(), Arc::clone(&self.globals));
        let children = engine.parse_blocks(&mut cursor, &|_| true, &mut attributes, true, true)?;
        debug!(
            title = %header.title,
            attributes = header.attributes.len(),
            blocks = children.len(),
            "document parsed"
        );
        Ok(Document::new(header, Body::new(children)))
    }

    /// Parse content without looking for a header.
    pub fn parse_body(&self, source: &str) -> ParserResult<Body> {
        let mut engine = Engine::new(self);
        let mut attributes = Attributes::new(Arc::clone(&self.globals));
        let children = engine.parse_blocks(
            &mut Cursor::from_text(source),
            &|_| true,
            &mut attributes,
            true,
            true,
        )?;
        Ok(Body::new(children))
    }

    /// Parse the value an attribute reference resolved to, with the document attributes known
    /// where the reference was written. A lone paragraph is flattened to its inline children.
    pub(crate) fn parse_fragment(&self, value: &str, attributes: &Options) -> ParserResult<Vec<Element>> {
        let mut engine = Engine::new(self);
        let mut attributes = Attributes::with_values(attributes.clone(), Arc::clone(&self.globals));
        let lines = Cursor::from_text(value).lines().to_vec();
        let mut elements = engine.parse_lines(lines, &mut attributes, false, false)?;
        if let [Element::Paragraph(paragraph)] = elements.as_mut_slice() {
            if paragraph.options.is_empty() {
                return Ok(std::mem::take(&mut paragraph.children));
            }
        }
        Ok(elements)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("globals", &self.globals)
            .field("resolver", &self.resolver.is_some())
            .field("max_depth", &self.max_depth)
            .field("include_encoding", &self.include_encoding)
            .finish()
    }
}
