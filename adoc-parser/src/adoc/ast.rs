//! The document tree
//!
//!     A parse produces a [`Document`]: a [`Header`] and a [`Body`] made of [`Element`]s.
//!     Elements form a closed tagged union, see the [elements] module. Every element carries an
//!     [`Options`] mapping (id, role, title, language, `data-*` pairs...) which is never absent,
//!     only empty.
//!
//!     The tree is immutable once produced. Renderers walk it through [`Visitor`].

pub mod document;
pub mod elements;
pub mod options;
pub mod traits;

pub use document::{Author, Body, Document, Header, Revision};
pub use elements::{
    Admonition, AdmonitionLevel, Anchor, AttributeReference, CallOut, Code, ComparisonOperator,
    Condition, ConditionalBlock, Container, DescriptionList, Element, Evaluator, Link, Macro,
    Section, Styling, Table, Text, Verbatim,
};
pub use options::Options;
pub use traits::{walk, Visitor};
