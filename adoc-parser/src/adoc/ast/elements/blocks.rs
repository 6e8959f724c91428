//! Block level elements
//!
//!     Paragraphs, quotes, open blocks and lists share [`Container`]: an ordered child sequence
//!     plus options. Sections add a level and a title, passthrough and listing blocks keep their
//!     lines verbatim in [`Verbatim`].

use super::element::Element;
use crate::adoc::ast::options::Options;
use serde::Serialize;
use std::fmt;

/// An ordered sequence of child elements
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Container {
    pub children: Vec<Element>,
    pub options: Options,
}

impl Container {
    pub fn new(children: Vec<Element>) -> Self {
        Self {
            children,
            options: Options::new(),
        }
    }

    pub fn with_options(children: Vec<Element>, options: Options) -> Self {
        Self { children, options }
    }
}

/// A titled section, its level is the number of `=` of its title line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub level: usize,
    pub title: Box<Element>,
    pub children: Vec<Element>,
    pub options: Options,
}

impl Section {
    pub fn new(level: usize, title: Element, children: Vec<Element>) -> Self {
        Self {
            level,
            title: Box::new(title),
            children,
            options: Options::new(),
        }
    }

    pub fn at(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

/// Lines kept as written, for passthrough (`++++`) and listing (`....`) blocks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verbatim {
    pub value: String,
    pub options: Options,
}

impl Verbatim {
    pub fn new(value: impl Into<String>, options: Options) -> Self {
        Self {
            value: value.into(),
            options,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmonitionLevel {
    Note,
    Tip,
    Important,
    Caution,
    Warning,
}

impl AdmonitionLevel {
    pub const ALL: [AdmonitionLevel; 5] = [
        AdmonitionLevel::Note,
        AdmonitionLevel::Tip,
        AdmonitionLevel::Important,
        AdmonitionLevel::Caution,
        AdmonitionLevel::Warning,
    ];

    /// The upper case prefix introducing the admonition, `NOTE` in `NOTE: text`.
    pub fn marker(&self) -> &'static str {
        match self {
            AdmonitionLevel::Note => "NOTE",
            AdmonitionLevel::Tip => "TIP",
            AdmonitionLevel::Important => "IMPORTANT",
            AdmonitionLevel::Caution => "CAUTION",
            AdmonitionLevel::Warning => "WARNING",
        }
    }

    pub fn from_marker(marker: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|it| it.marker() == marker)
    }
}

impl fmt::Display for AdmonitionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// `NOTE: ...` and friends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Admonition {
    pub level: AdmonitionLevel,
    pub content: Box<Element>,
    pub options: Options,
}

impl Admonition {
    pub fn new(level: AdmonitionLevel, content: Element) -> Self {
        Self {
            level,
            content: Box::new(content),
            options: Options::new(),
        }
    }
}
