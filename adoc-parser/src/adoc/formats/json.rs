//! JSON serialization of the document tree
//!
//!     The serde representation: elements are objects tagged by a `type` field holding their
//!     kebab-case kind, options are plain objects in insertion order. Attribute evaluators and
//!     `ifeval` snapshots are runtime state and are not written.

use super::registry::{FormatError, Formatter};
use crate::adoc::ast::Document;
use serde_json::Value;

pub fn to_json_value(doc: &Document) -> Result<Value, FormatError> {
    serde_json::to_value(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub fn to_json_string(doc: &Document, pretty: bool) -> Result<String, FormatError> {
    let result = if pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    };
    result.map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub struct JsonFormatter {
    pub pretty: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        to_json_string(doc, self.pretty)
    }

    fn description(&self) -> &str {
        "Document tree as JSON"
    }
}
