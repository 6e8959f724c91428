//! # adoc-parser
//!
//! A parser for an Asciidoc-like lightweight markup language.
//!
//! The engine is a hand-written recursive descent over a rewindable
//! [cursor](adoc::cursor) of lines:
//!
//! src/adoc
//!   ├── cursor        Rewindable line navigation
//!   ├── attributes    Attribute context and `{name}` substitution
//!   ├── options       `[...]` option strings
//!   ├── inlines       Single line tokenizer (spans, links, macros)
//!   ├── parsing       Block dispatcher and its sub-parsers
//!   ├── preprocess    `include::` and `ifdef`/`ifndef`/`ifeval`
//!   ├── resolver      Where included content comes from
//!   ├── assembling    Header then body, the public [`Parser`](adoc::Parser)
//!   ├── ast           The document tree
//!   ├── formats       Treeviz and JSON serializations
//!   ├── loader        Files and strings in, documents out
//!   └── error         [`ParserError`](adoc::ParserError)
//!
//! Renderers are out of scope: they consume the [`Document`](adoc::ast::Document)
//! through [`Visitor`](adoc::ast::Visitor) or one of the [formats](adoc::formats).

#![allow(rustdoc::invalid_html_tags)]

pub mod adoc;
