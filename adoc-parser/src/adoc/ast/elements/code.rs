//! Code blocks and their callouts

use super::element::Element;
use crate::adoc::ast::options::Options;
use serde::Serialize;
use std::fmt;

/// Fenced (`----`, ` ``` `) or inline (`` `...` ``) code
///
/// In-code callout markers `<n>` are rewritten to `(n)` in `value`, their explanations are
/// in `callouts`, ordered as written after the block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Code {
    pub value: String,
    pub callouts: Vec<CallOut>,
    pub inline: bool,
    pub options: Options,
}

impl Code {
    pub fn block(value: impl Into<String>, options: Options) -> Self {
        Self {
            value: value.into(),
            callouts: Vec::new(),
            inline: false,
            options,
        }
    }

    pub fn inline(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            callouts: Vec::new(),
            inline: true,
            options: Options::new(),
        }
    }

    pub fn with_callouts(mut self, callouts: Vec<CallOut>) -> Self {
        self.callouts = callouts;
        self
    }

    pub fn language(&self) -> Option<&str> {
        self.options.get("language")
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.inline { "InlineCode" } else { "Code" };
        match self.language() {
            Some(language) => write!(f, "{} [{}]", kind, language),
            None => write!(f, "{}", kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallOut {
    pub number: u32,
    pub explanation: Element,
}

impl CallOut {
    pub fn new(number: u32, explanation: Element) -> Self {
        Self {
            number,
            explanation,
        }
    }
}
