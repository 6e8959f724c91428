//! Element definitions for the document tree
//!
//!     [`Element`] is a closed tagged union: one variant per construct, each owning only the
//!     fields it needs plus its [`Options`](super::Options).
//!
//!     Elements fall in three families:
//!         Blocks: line based constructs (paragraphs, sections, lists, tables, code, quotes,
//!         delimited blocks, admonitions, conditional blocks). See [blocks], [list], [code]
//!         and [table].
//!         Inlines: spans inside a line (styled text, links, macros, anchors, attribute
//!         references, line breaks). See [inline].
//!         Conditionals: blocks guarded by a deferred [`Condition`]. See [conditional].

pub mod blocks;
pub mod code;
pub mod conditional;
pub mod element;
pub mod inline;
pub mod list;
pub mod table;

pub use blocks::{Admonition, AdmonitionLevel, Container, Section, Verbatim};
pub use code::{CallOut, Code};
pub use conditional::{ComparisonOperator, Condition, ConditionalBlock};
pub use element::Element;
pub use inline::{Anchor, AttributeReference, Evaluator, Link, Macro, Styling, Text};
pub use list::DescriptionList;
pub use table::Table;
