//! Inline parsing
//!
//!     Inlines are the spans inside one line: styled runs, links, macros, cross references,
//!     attribute references and forced line breaks. The tokenizer is a single left to right scan
//!     over the bytes of the line (every marker it reacts to is ASCII, so byte offsets always
//!     land on char boundaries where it slices).
//!
//!     Block structures can start in the middle of a paragraph (a list after a line of text, an
//!     admonition, a description list). When the tokenizer is given the cursor of the enclosing
//!     paragraph it detects them on the line, gives the line back and hands over to the block
//!     sub-parsers. Without a cursor (titles, span content, table cells) it only ever produces
//!     inlines.
//!
//!     See [parser] for the scan itself and [text] for plain runs: autolinks, legacy `[[id]]`
//!     anchors and the merging of adjacent runs.

pub mod parser;
pub mod text;

pub use text::{find_next_link, is_link, join_texts, merge_texts, LINK_PREFIXES};
