//! Block dispatcher
//!
//!     [`Engine`] carries what stays constant during one parse (the [`Parser`] configuration) and
//!     the nesting depth. Everything that changes as lines are consumed (the cursor, the attribute
//!     context) is passed explicitly to each call.
//!
//!     Dispatch priority for a meaningful line:
//!         1. `[options]`              pending options for the next block
//!         2. `....`                   listing block
//!         3. `.Title`                 pending title (only where titles are allowed)
//!         4. `=` title                section
//!         5. `----`, ```` ``` ````    code block
//!         6. `--`                     open block
//!         7. `|===`                   table
//!         8. `++++`                   passthrough block
//!         9. `<<<`                    page break
//!         10. `> `, `____`            quote
//!         11. `:name: value`          attribute declaration
//!         12. anything else           paragraph
//!
//!     Every branch but the options, title and attribute ones consumes the pending options.

use crate::adoc::assembling::Parser;
use crate::adoc::ast::{Element, Options};
use crate::adoc::attributes::{early_attribute_replacement, parse_attribute_definition, Attributes};
use crate::adoc::cursor::Cursor;
use crate::adoc::error::{ParserError, ParserResult};
use crate::adoc::options::parse_block_options;
use crate::adoc::parsing::paragraph::unwrap_paragraph;
use tracing::trace;

/// Decides whether the dispatcher keeps going on a line. A rejected line is left to the caller.
pub(crate) type Predicate<'a> = &'a dyn Fn(&str) -> bool;

/// The recursive descent state of one parse
pub(crate) struct Engine<'p> {
    pub(crate) parser: &'p Parser,
    depth: usize,
}

impl<'p> Engine<'p> {
    pub(crate) fn new(parser: &'p Parser) -> Self {
        Self { parser, depth: 0 }
    }

    /// Dispatch standalone lines (a block extent, a list item, an included file).
    pub(crate) fn parse_lines(
        &mut self,
        lines: Vec<String>,
        attributes: &mut Attributes,
        complex: bool,
        titles: bool,
    ) -> ParserResult<Vec<Element>> {
        let mut cursor = Cursor::new(lines);
        self.parse_blocks(&mut cursor, &|_| true, attributes, complex, titles)
    }

    /// Parse blocks until the cursor is exhausted or `keep_going` rejects a line.
    pub(crate) fn parse_blocks(
        &mut self,
        cursor: &mut Cursor,
        keep_going: Predicate<'_>,
        attributes: &mut Attributes,
        complex: bool,
        titles: bool,
    ) -> ParserResult<Vec<Element>> {
        let max = self.parser.max_depth();
        if self.depth >= max {
            return Err(Box::new(ParserError::NestingTooDeep { max }));
        }
        self.depth += 1;
        let result = self.dispatch(cursor, keep_going, attributes, complex, titles);
        self.depth -= 1;
        result
    }

    fn dispatch(
        &mut self,
        cursor: &mut Cursor,
        keep_going: Predicate<'_>,
        attributes: &mut Attributes,
        complex: bool,
        titles: bool,
    ) -> ParserResult<Vec<Element>> {
        let mut elements = Vec::new();
        let mut pending: Option<Options> = None;
        let mut options_line = None;

        while let Some(raw) = cursor.skip_blank_and_comments() {
            if !keep_going(&raw) {
                cursor.rewind();
                // the options right above the rejected line belong to it
                if options_line == Some(cursor.line_number()) {
                    cursor.rewind();
                }
                break;
            }

            let line = early_attribute_replacement(&raw, attributes, false);
            if line != raw {
                cursor.set_current_line(line.clone());
            }
            let at = cursor.line_number();
            let stripped = line.trim();

            if stripped.len() > 1 && stripped.starts_with('[') && stripped.ends_with(']') {
                let options = pending.get_or_insert_with(Options::new);
                if stripped == "[abstract]" {
                    options.insert("role", "abstract");
                } else {
                    options.merge(&parse_block_options(&stripped[1..stripped.len() - 1], None));
                    options_line = Some(at);
                }
                continue;
            }
            if titles && is_block_title(&line) {
                pending
                    .get_or_insert_with(Options::new)
                    .insert("title", line[1..].trim());
                continue;
            }
            if let Some((name, value)) = parse_attribute_definition(stripped) {
                let value = read_continued_value(value, cursor);
                trace!(name, value = %value, "attribute declaration");
                match name.strip_suffix('!').or_else(|| name.strip_prefix('!')) {
                    Some(name) => {
                        attributes.remove(name);
                    }
                    None => attributes.declare(name, &value),
                }
                continue;
            }

            let options = pending.take().unwrap_or_default();
            let (block, parsed) = match stripped {
                "...." => ("listing", self.parse_listing(cursor, options, attributes)),
                "----" | "```" => (
                    "code block",
                    self.parse_code_block(cursor, options, attributes, stripped),
                ),
                "--" => ("open block", self.parse_open_block(cursor, options, attributes)),
                "++++" => (
                    "passthrough",
                    self.parse_passthrough(cursor, options, attributes),
                ),
                "<<<" => ("page break", Ok(Element::PageBreak(options))),
                _ if line.starts_with('=') => {
                    cursor.rewind();
                    ("section", self.parse_section(cursor, options, attributes))
                }
                _ if stripped.starts_with("|===") => (
                    "table",
                    self.parse_table(cursor, options, attributes, stripped),
                ),
                _ if stripped.starts_with("> ") => {
                    cursor.rewind();
                    ("quote", self.parse_quote(cursor, options, attributes))
                }
                _ if stripped.starts_with("____") => (
                    "quote",
                    self.parse_delimited_quote(cursor, options, attributes, complex),
                ),
                _ => {
                    cursor.rewind();
                    let paragraph = self
                        .parse_paragraph(cursor, options, attributes, complex)
                        .map_err(|error| in_block("paragraph", at, error))?;
                    match unwrap_paragraph(paragraph) {
                        Element::Paragraph(paragraph)
                            if paragraph.options.is_empty()
                                && paragraph.children.iter().any(Element::is_section) =>
                        {
                            elements.extend(paragraph.children);
                        }
                        element => elements.push(element),
                    }
                    continue;
                }
            };
            elements.push(parsed.map_err(|error| in_block(block, at, error))?);
        }

        elements.retain(|element| !element.is_empty_paragraph());
        Ok(elements)
    }
}

/// Attach the block context to an error, once: the innermost block is the useful one.
fn in_block(block: &'static str, line: usize, error: Box<ParserError>) -> Box<ParserError> {
    match *error {
        ParserError::InBlock { .. } | ParserError::NestingTooDeep { .. } => error,
        _ => Box::new(ParserError::InBlock {
            block,
            line,
            source: error,
        }),
    }
}

/// `.Title`, not `..` nor `. item`.
pub(crate) fn is_block_title(line: &str) -> bool {
    line.starts_with('.') && !line.starts_with("..") && !line.starts_with(". ") && line.len() > 1
}

/// A value ending with `\` continues on the next line, joined with a single space.
pub(crate) fn read_continued_value(value: &str, cursor: &mut Cursor) -> String {
    let mut value = value.trim().to_string();
    while let Some(head) = value.strip_suffix('\\') {
        let head = head.trim_end();
        value = match cursor.next_line() {
            Some(next) => format!("{} {}", head, next.trim()),
            None => head.to_string(),
        };
    }
    value
}
