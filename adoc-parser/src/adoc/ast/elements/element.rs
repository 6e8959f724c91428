//! The [`Element`] tagged union
//!
//!     Every variant owns its fields and an [`Options`] mapping. [`Element::options`] is the
//!     shared accessor renderers use without matching on the variant.

use super::blocks::{Admonition, Container, Section, Verbatim};
use super::code::Code;
use super::conditional::ConditionalBlock;
use super::inline::{Anchor, AttributeReference, Link, Macro, Styling, Text};
use super::list::DescriptionList;
use super::table::Table;
use crate::adoc::ast::options::Options;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Element {
    Paragraph(Container),
    Section(Section),
    Text(Text),
    Code(Code),
    /// Raw content whose interpretation is deferred to the renderer (diagrams...)
    Listing(Verbatim),
    Link(Link),
    Macro(Macro),
    Anchor(Anchor),
    Admonition(Admonition),
    Table(Table),
    Quote(Container),
    OpenBlock(Container),
    PassthroughBlock(Verbatim),
    DescriptionList(DescriptionList),
    OrderedList(Container),
    UnorderedList(Container),
    LineBreak(Options),
    PageBreak(Options),
    ConditionalBlock(ConditionalBlock),
    AttributeReference(AttributeReference),
}

impl Element {
    /// Plain text, no styling nor options.
    pub fn text(value: impl Into<String>) -> Self {
        Element::Text(Text::new(value))
    }

    pub fn styled_text(styles: Vec<Styling>, value: impl Into<String>) -> Self {
        Element::Text(Text::styled(styles, value))
    }

    pub fn paragraph(children: Vec<Element>) -> Self {
        Element::Paragraph(Container::new(children))
    }

    pub fn unordered_list(children: Vec<Element>) -> Self {
        Element::UnorderedList(Container::new(children))
    }

    pub fn ordered_list(children: Vec<Element>) -> Self {
        Element::OrderedList(Container::new(children))
    }

    pub fn line_break() -> Self {
        Element::LineBreak(Options::new())
    }

    /// Lower case name of the variant, as used in serialized trees.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Paragraph(_) => "paragraph",
            Element::Section(_) => "section",
            Element::Text(_) => "text",
            Element::Code(_) => "code",
            Element::Listing(_) => "listing",
            Element::Link(_) => "link",
            Element::Macro(_) => "macro",
            Element::Anchor(_) => "anchor",
            Element::Admonition(_) => "admonition",
            Element::Table(_) => "table",
            Element::Quote(_) => "quote",
            Element::OpenBlock(_) => "open-block",
            Element::PassthroughBlock(_) => "passthrough-block",
            Element::DescriptionList(_) => "description-list",
            Element::OrderedList(_) => "ordered-list",
            Element::UnorderedList(_) => "unordered-list",
            Element::LineBreak(_) => "line-break",
            Element::PageBreak(_) => "page-break",
            Element::ConditionalBlock(_) => "conditional-block",
            Element::AttributeReference(_) => "attribute-reference",
        }
    }

    pub fn options(&self) -> &Options {
        match self {
            Element::Paragraph(it)
            | Element::Quote(it)
            | Element::OpenBlock(it)
            | Element::OrderedList(it)
            | Element::UnorderedList(it) => &it.options,
            Element::Section(it) => &it.options,
            Element::Text(it) => &it.options,
            Element::Code(it) => &it.options,
            Element::Listing(it) | Element::PassthroughBlock(it) => &it.options,
            Element::Link(it) => &it.options,
            Element::Macro(it) => &it.options,
            Element::Anchor(it) => &it.options,
            Element::Admonition(it) => &it.options,
            Element::Table(it) => &it.options,
            Element::DescriptionList(it) => &it.options,
            Element::LineBreak(options) | Element::PageBreak(options) => options,
            Element::ConditionalBlock(it) => &it.options,
            Element::AttributeReference(it) => &it.options,
        }
    }

    pub fn options_mut(&mut self) -> &mut Options {
        match self {
            Element::Paragraph(it)
            | Element::Quote(it)
            | Element::OpenBlock(it)
            | Element::OrderedList(it)
            | Element::UnorderedList(it) => &mut it.options,
            Element::Section(it) => &mut it.options,
            Element::Text(it) => &mut it.options,
            Element::Code(it) => &mut it.options,
            Element::Listing(it) | Element::PassthroughBlock(it) => &mut it.options,
            Element::Link(it) => &mut it.options,
            Element::Macro(it) => &mut it.options,
            Element::Anchor(it) => &mut it.options,
            Element::Admonition(it) => &mut it.options,
            Element::Table(it) => &mut it.options,
            Element::DescriptionList(it) => &mut it.options,
            Element::LineBreak(options) | Element::PageBreak(options) => options,
            Element::ConditionalBlock(it) => &mut it.options,
            Element::AttributeReference(it) => &mut it.options,
        }
    }

    /// Replace the options, consuming the element.
    pub fn with_options(mut self, options: Options) -> Self {
        *self.options_mut() = options;
        self
    }

    /// Direct block children, empty for leaves and for elements whose content is not a plain
    /// child sequence (tables, description lists, admonitions).
    pub fn children(&self) -> &[Element] {
        match self {
            Element::Paragraph(it)
            | Element::Quote(it)
            | Element::OpenBlock(it)
            | Element::OrderedList(it)
            | Element::UnorderedList(it) => &it.children,
            Element::Section(it) => &it.children,
            Element::ConditionalBlock(it) => &it.children,
            _ => &[],
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, Element::Section(_))
    }

    /// A paragraph with no children, dropped from block sequences.
    pub fn is_empty_paragraph(&self) -> bool {
        matches!(self, Element::Paragraph(p) if p.children.is_empty())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Paragraph(it) => write!(f, "Paragraph ({} children)", it.children.len()),
            Element::Section(it) => write!(f, "Section level {}", it.level),
            Element::Text(it) => write!(f, "{}", it),
            Element::Code(it) => write!(f, "{}", it),
            Element::Listing(it) => write!(f, "Listing ({} chars)", it.value.len()),
            Element::Link(it) => write!(f, "Link {}", it.url),
            Element::Macro(it) => write!(f, "Macro {}:{}", it.name, it.label),
            Element::Anchor(it) => write!(f, "Anchor {}", it.id),
            Element::Admonition(it) => write!(f, "Admonition {}", it.level),
            Element::Table(it) => write!(f, "Table ({} rows)", it.rows.len()),
            Element::Quote(it) => write!(f, "Quote ({} children)", it.children.len()),
            Element::OpenBlock(it) => write!(f, "OpenBlock ({} children)", it.children.len()),
            Element::PassthroughBlock(it) => {
                write!(f, "Passthrough ({} chars)", it.value.len())
            }
            Element::DescriptionList(it) => {
                write!(f, "DescriptionList ({} items)", it.items.len())
            }
            Element::OrderedList(it) => write!(f, "OrderedList ({} items)", it.children.len()),
            Element::UnorderedList(it) => {
                write!(f, "UnorderedList ({} items)", it.children.len())
            }
            Element::LineBreak(_) => write!(f, "LineBreak"),
            Element::PageBreak(_) => write!(f, "PageBreak"),
            Element::ConditionalBlock(it) => write!(f, "Conditional {}", it.condition),
            Element::AttributeReference(it) => write!(f, "Attribute {{{}}}", it.name),
        }
    }
}
