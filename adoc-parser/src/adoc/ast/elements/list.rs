//! Description lists
//!
//!     Ordered and unordered lists are plain [`Container`](super::Container)s. A description
//!     list pairs a term with its description, in source order.

use super::element::Element;
use crate::adoc::ast::options::Options;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DescriptionList {
    pub items: Vec<(Element, Element)>,
    pub options: Options,
}

impl DescriptionList {
    pub fn new(items: Vec<(Element, Element)>) -> Self {
        Self {
            items,
            options: Options::new(),
        }
    }

    pub fn description(&self, term: &str) -> Option<&Element> {
        self.items
            .iter()
            .find(|(key, _)| matches!(key, Element::Text(text) if text.value == term))
            .map(|(_, value)| value)
    }
}
