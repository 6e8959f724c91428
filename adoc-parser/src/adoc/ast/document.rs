//! Document, header and body

use super::elements::Element;
use super::options::Options;
use super::traits::{walk, Visitor};
use serde::Serialize;

/// The parsed document: header then body
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    pub header: Header,
    pub body: Body,
}

impl Document {
    pub fn new(header: Header, body: Body) -> Self {
        Self { header, body }
    }

    pub fn accept(&self, visitor: &mut dyn Visitor) {
        walk(visitor, self);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Header {
    pub title: String,
    pub author: Option<Author>,
    pub revision: Option<Revision>,
    pub attributes: Options,
}

impl Header {
    pub fn new(title: impl Into<String>, attributes: Options) -> Self {
        Self {
            title: title.into(),
            author: None,
            revision: None,
            attributes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.author.is_none()
            && self.revision.is_none()
            && self.attributes.is_empty()
    }
}

/// `Name <mail>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    pub mail: String,
}

/// `number, date: remark`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revision {
    pub number: String,
    pub date: String,
    pub remark: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Body {
    pub children: Vec<Element>,
}

impl Body {
    pub fn new(children: Vec<Element>) -> Self {
        Self { children }
    }
}
