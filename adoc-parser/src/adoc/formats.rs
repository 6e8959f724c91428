//! Output formats for parsed documents
//!
//! This module contains the serializations of a [`Document`](crate::adoc::ast::Document):
//! - treeviz, a one line per element view for debugging and snapshot tests
//! - json, the serde representation of the tree
//!
//! Formats are looked up by name through the [`FormatRegistry`].

pub mod json;
pub mod registry;
pub mod treeviz;

pub use json::{to_json_string, to_json_value, JsonFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
