//! Delimited blocks and admonitions
//!
//!     Verbatim blocks (`++++` passthrough, `....` listing) keep their lines as written, only
//!     `include::` lines are expanded. Open blocks (`--`) and quotes (`> ` lines or `____`) are
//!     containers: their extent is dispatched again.

use crate::adoc::ast::{Admonition, AdmonitionLevel, Container, Element, Options, Verbatim};
use crate::adoc::attributes::{early_attribute_replacement, AttributeLookup, Attributes, Layered};
use crate::adoc::cursor::Cursor;
use crate::adoc::error::ParserResult;
use crate::adoc::parsing::engine::Engine;
use crate::adoc::parsing::paragraph::unwrap_paragraph;

/// Attribute substitution requested by a `subs` option containing `attributes` (and not
/// `-attributes`). The block options are consulted before the document attributes.
pub(crate) fn apply_subs(value: &str, options: &Options, attributes: &Attributes) -> String {
    let requested = options
        .get("subs")
        .is_some_and(|subs| subs.contains("attributes") && !subs.contains("-attributes"));
    if !requested {
        return value.to_string();
    }
    let lookup = Layered::new(options as &dyn AttributeLookup, attributes);
    early_attribute_replacement(value, &lookup, true)
}

/// Lines up to the closing `fence`, which is consumed.
fn read_until(cursor: &mut Cursor, fence: &str) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(next) = cursor.next_line() {
        if next.trim() == fence {
            break;
        }
        lines.push(next);
    }
    lines
}

impl Engine<'_> {
    pub(crate) fn parse_passthrough(
        &mut self,
        cursor: &mut Cursor,
        options: Options,
        attributes: &mut Attributes,
    ) -> ParserResult<Element> {
        let value = self.read_verbatim(cursor, &options, attributes, "++++")?;
        Ok(Element::PassthroughBlock(Verbatim::new(value, options)))
    }

    pub(crate) fn parse_listing(
        &mut self,
        cursor: &mut Cursor,
        options: Options,
        attributes: &mut Attributes,
    ) -> ParserResult<Element> {
        let value = self.read_verbatim(cursor, &options, attributes, "....")?;
        Ok(Element::Listing(Verbatim::new(value, options)))
    }

    fn read_verbatim(
        &mut self,
        cursor: &mut Cursor,
        options: &Options,
        attributes: &Attributes,
        fence: &str,
    ) -> ParserResult<String> {
        let lines = read_until(cursor, fence);
        let lines = self.expand_includes(&lines, attributes, true)?;
        Ok(apply_subs(&lines.join("\n"), options, attributes))
    }

    pub(crate) fn parse_open_block(
        &mut self,
        cursor: &mut Cursor,
        options: Options,
        attributes: &mut Attributes,
    ) -> ParserResult<Element> {
        let lines = read_until(cursor, "--");
        let children = self.parse_lines(lines, attributes, true, true)?;
        Ok(Element::OpenBlock(Container::with_options(children, options)))
    }

    /// Markdown style quote: consecutive lines starting with `>`.
    pub(crate) fn parse_quote(
        &mut self,
        cursor: &mut Cursor,
        options: Options,
        attributes: &mut Attributes,
    ) -> ParserResult<Element> {
        let mut lines = Vec::new();
        while let Some(next) = cursor.next_line() {
            match next.trim_start().strip_prefix('>') {
                Some(content) => lines.push(content.trim_start().to_string()),
                None => {
                    cursor.rewind();
                    break;
                }
            }
        }
        let children = self.parse_lines(lines, attributes, true, true)?;
        Ok(Element::Quote(Container::with_options(children, options)))
    }

    pub(crate) fn parse_delimited_quote(
        &mut self,
        cursor: &mut Cursor,
        options: Options,
        attributes: &mut Attributes,
        complex: bool,
    ) -> ParserResult<Element> {
        let lines = read_until(cursor, "____");
        let children = self.parse_lines(lines, attributes, complex, false)?;
        Ok(Element::Quote(Container::with_options(children, options)))
    }

    /// `NOTE: text` and its following non-blank lines.
    pub(crate) fn parse_admonition(
        &mut self,
        cursor: &mut Cursor,
        line: &str,
        attributes: &mut Attributes,
    ) -> ParserResult<Option<Element>> {
        let Some((marker, rest)) = line.split_once(':') else {
            return Ok(None);
        };
        let Some(level) = AdmonitionLevel::from_marker(marker.trim()) else {
            return Ok(None);
        };

        let mut lines = vec![rest.trim_start().to_string()];
        while let Some(next) = cursor.next_line() {
            if next.trim().is_empty() {
                cursor.rewind();
                break;
            }
            lines.push(next);
        }
        let content = self.parse_paragraph(
            &mut Cursor::new(lines),
            Options::new(),
            attributes,
            true,
        )?;
        Ok(Some(Element::Admonition(Admonition::new(
            level,
            unwrap_paragraph(content),
        ))))
    }
}
