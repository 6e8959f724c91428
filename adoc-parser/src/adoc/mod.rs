//! Main module for adoc library functionality

pub mod assembling;
pub mod ast;
pub mod attributes;
pub mod cursor;
pub mod error;
pub mod formats;
pub mod inlines;
pub mod loader;
pub mod options;
pub mod parsing;
pub mod preprocess;
pub mod resolver;

pub use assembling::Parser;
pub use error::{ParserError, ParserResult};
