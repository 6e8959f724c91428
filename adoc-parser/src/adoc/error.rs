//! Errors raised while parsing
//!
//! Only structural and resolution problems are errors. Ambiguous inline markup (an unmatched
//! `*`, a bracket that is neither a link nor a macro) silently degrades to text.

use thiserror::Error;

/// Errors that can occur during parsing and tree construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParserError {
    /// The code block declares callout markers that don't match the callout list after it
    #[error("callout descriptions don't match the code, {markers} marker(s) and {descriptions} numbered description(s):\n{snippet}")]
    CalloutMismatch {
        markers: usize,
        descriptions: usize,
        snippet: String,
    },

    #[error("can't parse callout on line '{line}'")]
    InvalidCallout { line: String },

    /// Content found in the header where only attribute declarations are allowed
    #[error("unknown header line '{line}':\n{context}")]
    UnknownHeaderLine { line: String, context: String },

    #[error("unterminated option block in '{line}'")]
    UnterminatedOptions { line: String },

    #[error("missing include '{target}'")]
    MissingInclude { target: String },

    #[error("no content resolver configured, can't include '{target}'")]
    NoResolver { target: String },

    #[error("invalid number '{value}' for {context}")]
    InvalidNumber {
        value: String,
        context: &'static str,
    },

    #[error("invalid conditional expression '{expression}'")]
    InvalidExpression { expression: String },

    #[error("maximum nesting depth of {max} exceeded")]
    NestingTooDeep { max: usize },

    /// Wraps an error raised while parsing a block with the line that started it
    #[error("{block} starting at line {line}: {source}")]
    InBlock {
        block: &'static str,
        line: usize,
        #[source]
        source: Box<ParserError>,
    },
}

impl ParserError {
    pub fn invalid_number(value: impl Into<String>, context: &'static str) -> Self {
        ParserError::InvalidNumber {
            value: value.into(),
            context,
        }
    }

    /// The innermost error, skipping block context wrappers.
    pub fn root_cause(&self) -> &ParserError {
        match self {
            ParserError::InBlock { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Type alias for parser results with boxed errors (reduces stack size)
pub type ParserResult<T> = Result<T, Box<ParserError>>;

/// Format source context around an error line
///
/// Shows 2 lines before the offending one, the offending line with a >> marker, and 2 lines after.
/// `error_line` is 0-indexed, displayed numbers are 1-indexed.
pub fn format_source_context(lines: &[String], error_line: usize) -> String {
    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();
    for (line_num, line) in lines
        .iter()
        .enumerate()
        .take(end_line)
        .skip(start_line)
    {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, line));
    }
    context
}
