//! Block parsing
//!
//!     The block layer is a recursive descent over a [`Cursor`](crate::adoc::cursor::Cursor).
//!     [`Engine::parse_blocks`](engine::Engine::parse_blocks) is the dispatcher: it looks at the
//!     next meaningful line, decides which construct it opens and hands over to the matching
//!     sub-parser, which consumes the lines of that construct and returns one element.
//!
//!     Sub-parsers recurse into the dispatcher for the content of their blocks (sections, list
//!     items, open blocks, quotes, table cells, callouts). Two flags travel with every recursive
//!     call:
//!         complex: paragraph lines may open lists, admonitions and description lists, and a
//!         trailing ` +` is a line break.
//!         titles: `.Title` lines are block titles rather than text.
//!
//!     Sub-parsers:
//!         [paragraph]     paragraphs and the unwrapping of single child paragraphs
//!         [section]       `=` titles and everything until the next same level title
//!         [lists]         `*` and `.` lists
//!         [description]   `term:: description` lists
//!         [code]          `----` and fenced code blocks with callouts
//!         [table]         `|===` tables
//!         [delimited]     open blocks, quotes, passthrough and listing blocks, admonitions

pub mod code;
pub mod delimited;
pub mod description;
pub mod engine;
pub mod lists;
pub mod paragraph;
pub mod section;
pub mod table;

pub use paragraph::unwrap_paragraph;
