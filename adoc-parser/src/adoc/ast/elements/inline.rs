//! Inline elements
//!
//!     Produced by the inline tokenizer for spans inside a line: styled text, links, macros,
//!     anchors and attribute references.

use super::element::Element;
use crate::adoc::ast::options::Options;
use crate::adoc::attributes::AttributeLookup;
use crate::adoc::error::ParserResult;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Styling {
    Bold,
    Italic,
    Emphasis,
    Mark,
    Sub,
    Sup,
}

/// A run of text with optional stylings, outermost first
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Text {
    pub styles: Vec<Styling>,
    pub value: String,
    pub options: Options,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self::styled(Vec::new(), value)
    }

    pub fn styled(styles: Vec<Styling>, value: impl Into<String>) -> Self {
        Self {
            styles,
            value: value.into(),
            options: Options::new(),
        }
    }

    pub fn at(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// No styling and no options: can be merged with an adjacent plain run.
    pub fn is_plain(&self) -> bool {
        self.styles.is_empty() && self.options.is_empty()
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.styles.is_empty() {
            write!(f, "Text \"{}\"", self.value)
        } else {
            write!(f, "Text {:?} \"{}\"", self.styles, self.value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub url: String,
    pub label: String,
    pub options: Options,
}

impl Link {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
            options: Options::new(),
        }
    }

    pub fn at(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

/// `name:label[options]` (inline) or `name::label[options]` (block)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Macro {
    pub name: String,
    pub label: String,
    pub inline: bool,
    pub options: Options,
}

impl Macro {
    pub fn new(name: impl Into<String>, label: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            inline,
            options: Options::new(),
        }
    }

    pub fn at(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

/// `<<id,label>>` cross reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anchor {
    pub id: String,
    pub label: String,
    pub options: Options,
}

impl Anchor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            options: Options::new(),
        }
    }
}

type EvaluatorFn = dyn Fn(&str) -> ParserResult<Vec<Element>> + Send + Sync;

/// Turns the value a renderer resolved for an attribute reference into elements
///
/// Two evaluators always compare equal: trees are compared on their data.
#[derive(Clone)]
pub struct Evaluator(Arc<EvaluatorFn>);

impl Evaluator {
    pub fn new<F>(evaluate: F) -> Self
    where
        F: Fn(&str) -> ParserResult<Vec<Element>> + Send + Sync + 'static,
    {
        Self(Arc::new(evaluate))
    }

    /// An evaluator keeping the value as a single plain text.
    pub fn literal() -> Self {
        Self::new(|value| Ok(vec![Element::text(value)]))
    }

    pub fn evaluate(&self, value: &str) -> ParserResult<Vec<Element>> {
        (self.0)(value)
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Evaluator(..)")
    }
}

impl PartialEq for Evaluator {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// An unresolved `{name}`, bound late by the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeReference {
    pub name: String,
    #[serde(skip)]
    pub evaluator: Evaluator,
    pub options: Options,
}

impl AttributeReference {
    pub fn new(name: impl Into<String>, evaluator: Evaluator) -> Self {
        Self {
            name: name.into(),
            evaluator,
            options: Options::new(),
        }
    }

    /// Look the name up in `lookup` and evaluate the value, `None` when it is still undefined.
    pub fn resolve(&self, lookup: &dyn AttributeLookup) -> ParserResult<Option<Vec<Element>>> {
        match lookup.attribute(&self.name) {
            Some(value) => self.evaluator.evaluate(value).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn evaluators_never_break_equality() {
        let a = AttributeReference::new("a", Evaluator::literal());
        let b = AttributeReference::new("a", Evaluator::new(|_| Ok(vec![])));
        assert_eq!(a, b);
    }

    #[test]
    fn resolve_uses_the_lookup() {
        let reference = AttributeReference::new("version", Evaluator::literal());
        let mut attributes = HashMap::new();
        assert_eq!(reference.resolve(&attributes).unwrap(), None);
        attributes.insert("version".to_string(), "1.0".to_string());
        assert_eq!(
            reference.resolve(&attributes).unwrap(),
            Some(vec![Element::text("1.0")])
        );
    }
}
