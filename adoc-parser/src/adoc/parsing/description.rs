//! Description lists
//!
//!     `term:: description` items. The marker is the first run of at least two colons with a
//!     term before it and whitespace (or nothing) after it, so `include::a.adoc[]` or a url are
//!     never mistaken for one. The number of colons is the nesting level.
//!
//!     The description is the rest of the marker line plus the following lines up to a blank line
//!     or the next marker, blocks opened in it running across both.

use crate::adoc::ast::{Container, DescriptionList, Element, Options};
use crate::adoc::attributes::Attributes;
use crate::adoc::cursor::Cursor;
use crate::adoc::error::ParserResult;
use crate::adoc::parsing::engine::Engine;
use crate::adoc::parsing::lists::is_block_fence;
use crate::adoc::parsing::paragraph::unwrap_paragraph;

/// A description list marker found on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Marker<'a> {
    pub term: &'a str,
    pub level: usize,
    pub rest: &'a str,
}

pub(crate) fn description_marker(line: &str) -> Option<Marker<'_>> {
    let bytes = line.as_bytes();
    let mut at = 0;
    while at + 1 < bytes.len() {
        if bytes[at] != b':' || bytes[at + 1] != b':' {
            at += 1;
            continue;
        }
        let end = at + bytes[at..].iter().take_while(|b| **b == b':').count();
        let term = line[..at].trim();
        let followed_by_space = bytes.get(end).map_or(true, |b| b.is_ascii_whitespace());
        if !term.is_empty() && followed_by_space {
            return Some(Marker {
                term,
                level: end - at,
                rest: &line[end..],
            });
        }
        at = end;
    }
    None
}

impl Engine<'_> {
    pub(crate) fn parse_description_list(
        &mut self,
        cursor: &mut Cursor,
        level: usize,
        attributes: &mut Attributes,
    ) -> ParserResult<Element> {
        let mut items: Vec<(Element, Element)> = Vec::new();
        while let Some(line) = cursor.next_line() {
            let marker = match description_marker(&line) {
                Some(marker) if !line.trim().is_empty() && marker.level >= level => marker,
                _ => {
                    cursor.rewind();
                    break;
                }
            };
            if marker.level > level {
                cursor.rewind();
                let nested = self.parse_description_list(cursor, level + 1, attributes)?;
                let has_items = matches!(&nested, Element::DescriptionList(list) if !list.items.is_empty());
                match items.last_mut() {
                    Some((_, description)) if has_items => {
                        let previous = std::mem::replace(description, Element::paragraph(Vec::new()));
                        *description = nest_into(previous, nested);
                    }
                    _ => {}
                }
                continue;
            }

            let mut lines = Vec::new();
            let first = marker.rest.trim();
            if !first.is_empty() {
                lines.push(first.to_string());
            }
            read_description(cursor, &mut lines);

            let mut elements = self.parse_lines(lines, attributes, true, false)?;
            let description = match elements.len() {
                1 if matches!(elements[0], Element::Paragraph(_)) => match elements.remove(0) {
                    Element::Paragraph(paragraph) => paragraph,
                    other => Container::new(vec![other]),
                },
                _ => Container::new(elements),
            };
            let description = unwrap_paragraph(description);

            let mut term = self.parse_lines(vec![marker.term.to_string()], attributes, false, false)?;
            let term = match term.len() {
                1 => term.remove(0),
                _ => Element::Paragraph(Container::with_options(
                    term,
                    Options::from([("nowrap", "true")]),
                )),
            };
            items.push((term, description));
        }
        Ok(Element::DescriptionList(DescriptionList::new(items)))
    }
}

fn read_description(cursor: &mut Cursor, lines: &mut Vec<String>) {
    let mut open: Option<String> = None;
    while let Some(next) = cursor.next_line() {
        let stripped = next.trim();
        match open.as_deref() {
            Some(fence) if fence == stripped => open = None,
            Some(_) => {}
            None if stripped.is_empty() || description_marker(&next).is_some() => {
                cursor.rewind();
                break;
            }
            None if is_block_fence(stripped) => open = Some(stripped.to_string()),
            None if stripped == "+" => {
                lines.push(String::new());
                continue;
            }
            None => {}
        }
        lines.push(next);
    }
}

fn nest_into(target: Element, nested: Element) -> Element {
    match target {
        Element::Paragraph(mut paragraph) => {
            paragraph.children.push(nested);
            Element::Paragraph(paragraph)
        }
        Element::Text(text) => {
            let options = text.options.clone();
            Element::Paragraph(Container::with_options(
                vec![Element::Text(text), nested],
                options,
            ))
        }
        other => Element::paragraph(vec![other, nested]),
    }
}
