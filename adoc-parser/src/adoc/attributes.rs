//! Attribute context and `{name}` substitution
//!
//!     Attributes are looked up in layers: the document's own attributes first (header
//!     declarations, body declarations, implicit ones like `sectnumlevels`), then the globals
//!     the [`Parser`](crate::adoc::Parser) was configured with.
//!
//!     The document layer is one mutable [`Attributes`] value threaded by `&mut` through the
//!     whole recursive descent: a declaration is visible to everything parsed after it.

use crate::adoc::ast::Options;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::Arc;

/// Read access to attribute values by name
pub trait AttributeLookup {
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl AttributeLookup for Options {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

impl<S: BuildHasher> AttributeLookup for HashMap<String, String, S> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl AttributeLookup for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// The empty lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttributes;

impl AttributeLookup for NoAttributes {
    fn attribute(&self, _name: &str) -> Option<&str> {
        None
    }
}

/// Two lookups, the first one wins
pub struct Layered<'a> {
    first: &'a dyn AttributeLookup,
    second: &'a dyn AttributeLookup,
}

impl<'a> Layered<'a> {
    pub fn new(first: &'a dyn AttributeLookup, second: &'a dyn AttributeLookup) -> Self {
        Self { first, second }
    }
}

impl AttributeLookup for Layered<'_> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.first
            .attribute(name)
            .or_else(|| self.second.attribute(name))
    }
}

/// The mutable attribute context of one parse
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    values: Options,
    globals: Arc<Options>,
}

impl Attributes {
    pub fn new(globals: Arc<Options>) -> Self {
        Self::with_values(Options::new(), globals)
    }

    pub fn with_values(values: Options, globals: Arc<Options>) -> Self {
        Self { values, globals }
    }

    /// Document value first, then global.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).or_else(|| self.globals.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name, value);
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// Handle a `:name: value` declaration.
    ///
    /// A `+N`/`-N` value is an offset against the current value only when `name` also shows up
    /// as the value of some attribute and the current value is an integer. Anything else stores
    /// the value as written.
    pub fn declare(&mut self, name: &str, value: &str) {
        if (value.starts_with('+') || value.starts_with('-')) && self.values.contains_value(name) {
            let current = self.values.get(name).and_then(|it| it.trim().parse::<i64>().ok());
            let offset = value.trim().parse::<i64>().ok();
            if let (Some(current), Some(offset)) = (current, offset) {
                self.set(name, (current + offset).to_string());
                return;
            }
        }
        self.set(name, value);
    }

    /// The document layer only.
    pub fn values(&self) -> &Options {
        &self.values
    }

    pub fn globals(&self) -> &Arc<Options> {
        &self.globals
    }

    pub fn into_values(self) -> Options {
        self.values
    }

    /// A flattened copy of both layers, document values winning.
    pub fn snapshot(&self) -> Options {
        let mut snapshot = self.values.clone();
        snapshot.merge_under(&self.globals);
        snapshot
    }
}

impl AttributeLookup for Attributes {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

static ATTRIBUTE_DEFINITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:(?P<name>[^\n\t:]+):(?: +(?P<value>.+))? *$").unwrap());

/// Split a `:name: value` declaration into its name and raw value.
///
/// The name keeps a leading or trailing `!` (unset form), the value may still end with the `\`
/// of a continuation.
pub fn parse_attribute_definition(line: &str) -> Option<(&str, &str)> {
    let captures = ATTRIBUTE_DEFINITION.captures(line)?;
    let name = captures.name("name")?.as_str();
    let value = captures.name("value").map_or("", |value| value.as_str());
    Some((name, value))
}

/// Replace every resolvable `{name}` in `text`.
///
/// Unknown names stay literal. An escaped placeholder `\{name}` is never replaced, with
/// `unescape` its backslash is dropped.
pub fn early_attribute_replacement(
    text: &str,
    lookup: &dyn AttributeLookup,
    unescape: bool,
) -> String {
    if !text.contains('{') {
        return text.to_string();
    }
    let names = referenced_names(text, lookup);
    if names.is_empty() {
        return text.to_string();
    }

    let mut result = text.to_string();
    for name in names {
        let Some(replacement) = lookup.attribute(&name) else {
            continue;
        };
        let placeholder = format!("{{{}}}", name);
        let mut start = 0;
        while let Some(found) = result[start..].find(&placeholder).map(|it| it + start) {
            if found > 0 && result.as_bytes()[found - 1] == b'\\' {
                if unescape {
                    result.remove(found - 1);
                    start = found - 1 + placeholder.len();
                } else {
                    start = found + placeholder.len();
                }
                continue;
            }
            result.replace_range(found..found + placeholder.len(), replacement);
            start = found + replacement.len();
        }
    }
    result
}

/// Distinct resolvable names referenced in `text`, in order of first appearance.
///
/// A name is delimited by `{` and `}` and never contains a space.
fn referenced_names(text: &str, lookup: &dyn AttributeLookup) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut names: Vec<String> = Vec::new();
    let mut from = 0;
    while let Some(open) = text[from..].find('{').map(|it| it + from) {
        let mut to = open + 1;
        while to < bytes.len() && bytes[to] != b'}' && bytes[to] != b' ' && bytes[to] != b'{' {
            to += 1;
        }
        if to < bytes.len() && bytes[to] == b'}' {
            let name = &text[open + 1..to];
            if !name.is_empty()
                && lookup.attribute(name).is_some()
                && !names.iter().any(|it| it == name)
            {
                names.push(name.to_string());
            }
            from = to + 1;
        } else {
            from = open + 1;
        }
    }
    names
}
