//! Ordered and unordered lists
//!
//!     The marker length is the nesting level: `*`, `**`, `***` (or `.`, `..`, `...`, optionally
//!     preceded by a number). An item spans its marker line plus continuation lines: lines up to
//!     a blank line or the next marker, a lone `+` standing for a blank line inside the item.
//!     Delimited blocks opened in an item (`----`, ```` ``` ````, `--`, `++++`) keep going across
//!     blank lines and markers until they close.
//!
//!     A deeper marker starts a nested list which is attached to the previous item.

use crate::adoc::ast::{Container, Element, Options};
use crate::adoc::attributes::Attributes;
use crate::adoc::cursor::Cursor;
use crate::adoc::error::ParserResult;
use crate::adoc::parsing::engine::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

static UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\*+) .+").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*(\.+) .+").unwrap());

/// Fences of the blocks a list item or a description can hold across blank lines.
pub(crate) fn is_block_fence(line: &str) -> bool {
    matches!(line.trim(), "----" | "```" | "--" | "++++")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn pattern(self) -> &'static Regex {
        match self {
            ListKind::Ordered => &ORDERED_ITEM,
            ListKind::Unordered => &UNORDERED_ITEM,
        }
    }

    /// Nesting level of an item line of this kind (1 for a single marker).
    pub(crate) fn marker_level(self, line: &str) -> Option<usize> {
        self.pattern()
            .captures(line)
            .and_then(|captures| captures.get(1))
            .map(|marker| marker.len())
    }

    /// The item content after its marker.
    fn content(self, line: &str) -> &str {
        self.pattern()
            .captures(line)
            .and_then(|captures| captures.get(1))
            .map_or(line, |marker| line[marker.end()..].trim_start())
    }

    fn build(self, children: Vec<Element>) -> Element {
        match self {
            ListKind::Ordered => Element::OrderedList(Container::new(children)),
            ListKind::Unordered => Element::UnorderedList(Container::new(children)),
        }
    }
}

impl Engine<'_> {
    pub(crate) fn parse_list(
        &mut self,
        cursor: &mut Cursor,
        kind: ListKind,
        level: usize,
        attributes: &mut Attributes,
    ) -> ParserResult<Element> {
        let mut children: Vec<Element> = Vec::new();
        while let Some(line) = cursor.next_line() {
            let stripped = line.trim();
            let Some(found) = kind.marker_level(stripped) else {
                cursor.rewind();
                break;
            };
            if found < level {
                cursor.rewind();
                break;
            }
            if found > level {
                cursor.rewind();
                let nested = self.parse_list(cursor, kind, level + 1, attributes)?;
                if !nested.children().is_empty() {
                    attach_to_last(&mut children, nested);
                }
                continue;
            }

            let lines = read_item(cursor, kind, kind.content(stripped));
            let mut elements = self.parse_lines(lines, attributes, true, false)?;
            children.push(match elements.len() {
                1 => elements.remove(0),
                _ => Element::paragraph(elements),
            });
        }
        Ok(kind.build(children))
    }
}

fn read_item(cursor: &mut Cursor, kind: ListKind, first: &str) -> Vec<String> {
    let mut lines = vec![first.to_string()];
    let mut open: Option<String> = None;
    while let Some(next) = cursor.next_line() {
        let stripped = next.trim();
        match open.as_deref() {
            Some(fence) if fence == stripped => open = None,
            Some(_) => {}
            None if is_block_fence(stripped) => open = Some(stripped.to_string()),
            None if stripped.is_empty() || kind.marker_level(stripped).is_some() => {
                cursor.rewind();
                break;
            }
            None if stripped == "+" => {
                lines.push(String::new());
                continue;
            }
            None => {}
        }
        lines.push(next);
    }
    lines
}

/// Attach a nested list to the last item: appended to a paragraph item, a text item becomes a
/// paragraph holding both.
fn attach_to_last(children: &mut Vec<Element>, nested: Element) {
    match children.pop() {
        Some(Element::Paragraph(mut paragraph)) => {
            paragraph.children.push(nested);
            children.push(Element::Paragraph(paragraph));
        }
        Some(Element::Text(text)) => {
            let options: Options = text.options.clone();
            children.push(Element::Paragraph(Container::with_options(
                vec![Element::Text(text), nested],
                options,
            )));
        }
        Some(other) => {
            children.push(other);
            children.push(nested);
        }
        None => children.push(nested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adoc::ast::{Code, Styling};
    use crate::adoc::Parser;
    use proptest::prelude::*;

    fn list(source: &str, kind: ListKind) -> Element {
        let parser = Parser::new();
        let mut engine = Engine::new(&parser);
        let mut attributes = Attributes::default();
        engine
            .parse_list(&mut Cursor::from_text(source), kind, 1, &mut attributes)
            .unwrap()
    }

    fn texts(values: &[&str]) -> Vec<Element> {
        values.iter().map(|value| Element::text(*value)).collect()
    }

    #[test]
    fn flat_lists() {
        assert_eq!(
            list("* a\n* b\n* c", ListKind::Unordered),
            Element::unordered_list(texts(&["a", "b", "c"]))
        );
        assert_eq!(
            list(". a\n. b", ListKind::Ordered),
            Element::ordered_list(texts(&["a", "b"]))
        );
        assert_eq!(
            list("1. a\n2. b\n10. c", ListKind::Ordered),
            Element::ordered_list(texts(&["a", "b", "c"]))
        );
    }

    #[test]
    fn nested_list_attaches_to_text_item() {
        assert_eq!(
            list("* a\n** a.1\n** a.2\n* b", ListKind::Unordered),
            Element::unordered_list(vec![
                Element::paragraph(vec![
                    Element::text("a"),
                    Element::unordered_list(texts(&["a.1", "a.2"])),
                ]),
                Element::text("b"),
            ])
        );
    }

    #[test]
    fn multiline_items_join_lines() {
        assert_eq!(
            list("* first\n  continued\n* second", ListKind::Unordered),
            Element::unordered_list(texts(&["first continued", "second"]))
        );
    }

    #[test]
    fn styled_item() {
        assert_eq!(
            list("* *bold* item", ListKind::Unordered),
            Element::unordered_list(vec![Element::paragraph(vec![
                Element::styled_text(vec![Styling::Bold], "bold"),
                Element::text(" item"),
            ])])
        );
    }

    #[test]
    fn continuation_with_code_block() {
        let source = "* item\n+\n----\ncode\n\nmore\n----\n* next";
        assert_eq!(
            list(source, ListKind::Unordered),
            Element::unordered_list(vec![
                Element::paragraph(vec![
                    Element::text("item"),
                    Element::Code(Code::block("code\n\nmore\n", Options::new())),
                ]),
                Element::text("next"),
            ])
        );
    }

    #[test]
    fn stops_at_blank_line() {
        let parser = Parser::new();
        let mut engine = Engine::new(&parser);
        let mut attributes = Attributes::default();
        let mut cursor = Cursor::from_text("* a\n\nafter");
        engine
            .parse_list(&mut cursor, ListKind::Unordered, 1, &mut attributes)
            .unwrap();
        assert_eq!(cursor.next_line().as_deref(), Some(""));
    }

    fn depth(element: &Element) -> usize {
        element
            .children()
            .iter()
            .map(|child| match child {
                Element::UnorderedList(_) => 1 + depth(child),
                _ => depth(child),
            })
            .max()
            .unwrap_or(0)
    }

    proptest! {
        #[test]
        fn nesting_follows_marker_length(levels in proptest::collection::vec(1usize..4, 1..8)) {
            // start at level 1 and never jump more than one level deeper
            let mut current = 0;
            let mut lines = Vec::new();
            for level in levels {
                current = level.min(current + 1);
                lines.push(format!("{} item", "*".repeat(current)));
            }
            let deepest = lines
                .iter()
                .map(|line| line.chars().take_while(|c| *c == '*').count())
                .max()
                .unwrap_or(1);
            let parsed = list(&lines.join("\n"), ListKind::Unordered);
            prop_assert_eq!(depth(&parsed) + 1, deepest);
        }
    }
}
