//! Plain text runs
//!
//!     Whatever the tokenizer does not recognize ends up in a plain run. Runs still get two
//!     treatments: bare URLs become links (autolinks) and a legacy `[[id]]` anchor glued to the
//!     start or the end of a run becomes the `id` option of the text.

use crate::adoc::ast::{Element, Link, Options, Styling, Text};

/// Schemes recognized by autolinks and by the link/macro disambiguation.
pub const LINK_PREFIXES: [&str; 7] = [
    "http://", "https://", "ftp://", "ftps://", "irc://", "file://", "mailto:",
];

pub fn is_link(value: &str) -> bool {
    LINK_PREFIXES.iter().any(|prefix| value.starts_with(prefix))
}

/// Byte offset of the first link prefix in `text`.
pub fn find_next_link(text: &str) -> Option<usize> {
    LINK_PREFIXES
        .iter()
        .filter_map(|prefix| text.find(prefix))
        .min()
}

/// Push the plain run `text`, splitting out autolinks. Whitespace-only runs are dropped.
pub(crate) fn flush_text(elements: &mut Vec<Element>, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    let mut rest = text;
    while let Some(at) = find_next_link(rest) {
        if at > 0 {
            elements.push(new_text(Vec::new(), &rest[..at], Options::new()));
        }
        let end = rest[at..]
            .find([' ', '\t'])
            .map_or(rest.len(), |offset| at + offset);
        let url = &rest[at..end];
        elements.push(Element::Link(Link::new(url, url)));
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        elements.push(new_text(Vec::new(), rest, Options::new()));
    }
}

/// Build a text element, lifting a legacy `[[id]]` anchor into the options.
///
/// An `id` already present in `options` wins over the anchor, the anchor is stripped anyway.
pub(crate) fn new_text(styles: Vec<Styling>, value: &str, mut options: Options) -> Element {
    let mut value = value;
    if let Some(rest) = value.strip_prefix("[[") {
        if let Some(end) = rest.find("]]").filter(|end| *end > 0) {
            options.insert_if_absent("id", &rest[..end]);
            value = rest[end + 2..].trim();
        }
    } else if let Some(head) = value.strip_suffix("]]") {
        if let Some(start) = head.rfind("[[").filter(|start| *start + 2 < head.len()) {
            options.insert_if_absent("id", &head[start + 2..]);
            value = head[..start].trim();
        }
    }
    Element::Text(Text::styled(styles, value).at(options))
}

/// Merge adjacent plain texts of one line, the values are concatenated as is.
pub fn merge_texts(elements: Vec<Element>) -> Vec<Element> {
    merge_with(elements, |left, right| format!("{}{}", left, right))
}

/// Merge adjacent plain texts coming from consecutive lines of a paragraph: the line break
/// between them collapses to a single space.
pub fn join_texts(elements: Vec<Element>) -> Vec<Element> {
    merge_with(elements, |left, right| {
        format!("{} {}", left.trim_end(), right.trim_start())
    })
}

fn merge_with(elements: Vec<Element>, join: impl Fn(&str, &str) -> String) -> Vec<Element> {
    let mut merged: Vec<Element> = Vec::with_capacity(elements.len());
    let mut touched = false;
    for element in elements {
        if let Element::Text(text) = &element {
            if text.is_plain() {
                if let Some(Element::Text(previous)) = merged.last_mut() {
                    if previous.is_plain() {
                        previous.value = join(&previous.value, &text.value);
                        touched = true;
                        continue;
                    }
                }
            }
        }
        merged.push(element);
    }
    if !touched {
        return merged;
    }
    merged
        .into_iter()
        .map(|element| match element {
            Element::Text(text) if text.is_plain() => new_text(text.styles, &text.value, text.options),
            other => other,
        })
        .collect()
}
