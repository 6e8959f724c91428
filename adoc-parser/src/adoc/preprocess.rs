//! Preprocessor directives
//!
//!     Line level directives that are resolved while parsing rather than turned into markup:
//!
//!         [include]       `include::target[options]`, content from the content resolver
//!         [conditional]   `ifdef`/`ifndef`/`ifeval` regions up to their `endif`
//!         [expression]    the `left op right` language of `ifeval`, lexed with logos
//!
//!     Both directives hook into the [`Engine`](crate::adoc::parsing::engine::Engine): includes
//!     are spliced as lines (verbatim blocks) or parsed in place (paragraphs), conditional
//!     regions are parsed with the current attributes and kept with their condition.

pub mod conditional;
pub mod expression;
pub mod include;

pub use expression::parse_condition;
