//! Line tokenizer
//!
//!     [`Engine::tokenize_line`] turns one line into inline elements. Markers, in the order the
//!     scan reacts to them:
//!
//!         ` +` at the end         forced line break (complex mode only), ends the line
//!         `\x`                    `x` is literal
//!         `{name}`                attribute reference, bound late
//!         `*b*` `_i_` `~s~` `^s^` bold, italic, subscript, superscript (content re-tokenized)
//!         `[opts]#m#`, `#m#`      marked span, the brackets give its role/id
//!         `` `c` ``               inline code, or a link rendered as code
//!         `<<id,label>>`          cross reference
//!         `token[...]`            link (`https://...[label]`) or macro (`name:target[opts]`)
//!
//!     After `name:` followed by a non-space and a later `[`, span markers are ignored until that
//!     bracket: they belong to the macro target.
//!
//!     An attribute reference ends at the first `}`, whatever follows it: `{base}/index` and
//!     `{name}s` are references directly followed by text. A name holding whitespace is not a
//!     reference, the braces stay text.

use crate::adoc::ast::{
    Anchor, AttributeReference, Code, Container, Element, Evaluator, Link, Macro, Styling,
};
use crate::adoc::attributes::Attributes;
use crate::adoc::cursor::Cursor;
use crate::adoc::error::ParserResult;
use crate::adoc::inlines::text::{flush_text, is_link, merge_texts, new_text};
use crate::adoc::options::parse_block_options;
use crate::adoc::parsing::description::description_marker;
use crate::adoc::parsing::engine::Engine;
use crate::adoc::parsing::lists::ListKind;
use crate::adoc::parsing::paragraph::unwrap_paragraph;

impl Engine<'_> {
    /// Tokenize one line.
    ///
    /// With `complex` and a `cursor` (the one the line was just read from), the line may open an
    /// admonition, a list or a description list; it is then given back to the cursor and the
    /// whole structure is parsed from there.
    pub(crate) fn tokenize_line(
        &mut self,
        mut cursor: Option<&mut Cursor>,
        line: &str,
        attributes: &mut Attributes,
        complex: bool,
    ) -> ParserResult<Vec<Element>> {
        if complex {
            if let Some(cursor) = cursor.as_deref_mut() {
                if let Some(structure) = self.line_structure(cursor, line, attributes)? {
                    return Ok(vec![structure]);
                }
            }
        }

        let bytes = line.as_bytes();
        let len = bytes.len();
        let mut elements = Vec::new();
        let mut start = 0;
        let mut in_macro = false;
        let mut i = 0;
        while i < len {
            if complex && i + 2 == len && line.ends_with(" +") {
                flush_text(&mut elements, &line[start..i]);
                elements.push(Element::line_break());
                start = len;
                break;
            }

            let c = bytes[i];
            if in_macro && c != b'[' {
                i += 1;
                continue;
            }

            match c {
                b':' => {
                    in_macro = i > 0
                        && i + 1 < len
                        && bytes[i + 1] != b' '
                        && bytes[i - 1] != b' '
                        && line[i + 1..].contains('[');
                }
                b'\\' => {
                    flush_text(&mut elements, &line[start..i]);
                    start = i + 1;
                    i += 1 + line[i + 1..].chars().next().map_or(0, char::len_utf8);
                    continue;
                }
                b'{' => {
                    if let Some(end) = find_byte(bytes, b'}', i + 1) {
                        let name = &line[i + 1..end];
                        if !name.is_empty() && !name.contains(char::is_whitespace) {
                            flush_text(&mut elements, &line[start..i]);
                            elements.push(self.attribute_reference(name, attributes));
                            i = end + 1;
                            start = i;
                            continue;
                        }
                    }
                }
                b'*' | b'_' | b'~' | b'^' => {
                    if !in_autolink(line, start, i) {
                        if let Some(end) = find_byte(bytes, c, i + 1).filter(|end| *end > i + 1) {
                            flush_text(&mut elements, &line[start..i]);
                            let style = match c {
                                b'*' => Styling::Bold,
                                b'_' => Styling::Italic,
                                b'~' => Styling::Sub,
                                _ => Styling::Sup,
                            };
                            self.push_span(&mut elements, &line[i + 1..end], style, None, attributes)?;
                            i = end + 1;
                            start = i;
                            continue;
                        }
                    }
                }
                b'[' => {
                    in_macro = false;
                    if let Some(next) = self.bracket(
                        &mut elements,
                        cursor.as_deref_mut(),
                        line,
                        start,
                        i,
                        attributes,
                    )? {
                        i = next;
                        start = i;
                        continue;
                    }
                }
                b'#' => {
                    let run = bytes[i..].iter().take_while(|b| **b == b'#').count();
                    let delimiter = &line[i..i + run];
                    if let Some(end) = line[i + run..].find(delimiter).map(|at| at + i + run) {
                        let mut text_end = i;
                        let mut options = None;
                        if i > 0 && bytes[i - 1] == b']' {
                            if let Some(open) = line[..i - 1].rfind('[').filter(|open| *open >= start) {
                                options = Some(&line[open + 1..i - 1]);
                                text_end = open;
                            }
                        }
                        flush_text(&mut elements, &line[start..text_end]);
                        self.push_span(
                            &mut elements,
                            &line[i + run..end],
                            Styling::Mark,
                            options,
                            attributes,
                        )?;
                        i = end + run;
                        start = i;
                        continue;
                    }
                }
                b'`' => {
                    if let Some(end) = find_byte(bytes, b'`', i + 1) {
                        flush_text(&mut elements, &line[start..i]);
                        elements.push(self.inline_code(&line[i + 1..end], attributes)?);
                        i = end + 1;
                        start = i;
                        continue;
                    }
                }
                b'<' if i + 4 < len && bytes[i + 1] == b'<' => {
                    if let Some(end) = line[i + 2..].find(">>").map(|at| at + i + 2) {
                        if end > i + 2 {
                            flush_text(&mut elements, &line[start..i]);
                            let reference = &line[i + 2..end];
                            let anchor = match reference.find(',').filter(|at| *at > 0) {
                                Some(comma) => {
                                    Anchor::new(&reference[..comma], &reference[comma + 1..])
                                }
                                None => Anchor::new(reference, ""),
                            };
                            elements.push(Element::Anchor(anchor));
                            i = end + 2;
                            start = i;
                            continue;
                        }
                    }
                }
                _ => {}
            }
            i += 1;
        }
        if start < len {
            flush_text(&mut elements, &line[start..]);
        }
        Ok(merge_texts(elements))
    }

    /// Block structures a paragraph line can open.
    fn line_structure(
        &mut self,
        cursor: &mut Cursor,
        line: &str,
        attributes: &mut Attributes,
    ) -> ParserResult<Option<Element>> {
        if let Some(admonition) = self.parse_admonition(cursor, line, attributes)? {
            return Ok(Some(admonition));
        }
        for kind in [ListKind::Ordered, ListKind::Unordered] {
            if kind.marker_level(line) == Some(1) {
                cursor.rewind();
                return self.parse_list(cursor, kind, 1, attributes).map(Some);
            }
        }
        if line.contains("::") && description_marker(line).is_some_and(|marker| marker.level == 2) {
            cursor.rewind();
            return self.parse_description_list(cursor, 2, attributes).map(Some);
        }
        Ok(None)
    }

    /// Push a styled span. Its content is tokenized again so spans nest: `*_a_*` is a text
    /// styled bold then italic.
    fn push_span(
        &mut self,
        elements: &mut Vec<Element>,
        content: &str,
        style: Styling,
        raw_options: Option<&str>,
        attributes: &mut Attributes,
    ) -> ParserResult<()> {
        let nested = self.tokenize_line(None, content, attributes, true)?;
        let options = raw_options
            .map(|raw| parse_block_options(raw, None))
            .unwrap_or_default();

        if nested.len() == 1 && !matches!(nested[0], Element::Text(_)) && !options.is_empty() {
            elements.push(unwrap_paragraph(Container::with_options(nested, options)));
            return Ok(());
        }
        for element in nested {
            elements.push(match element {
                Element::Text(text) => {
                    let mut styles = vec![style];
                    styles.extend(text.styles);
                    let mut merged = text.options;
                    merged.merge(&options);
                    new_text(styles, &text.value, merged)
                }
                other => other,
            });
        }
        Ok(())
    }

    fn attribute_reference(&self, name: &str, attributes: &Attributes) -> Element {
        let parser = self.parser.clone();
        let snapshot = attributes.values().clone();
        let evaluator = Evaluator::new(move |value| parser.parse_fragment(value, &snapshot));
        Element::AttributeReference(AttributeReference::new(name, evaluator))
    }

    fn inline_code(&mut self, content: &str, attributes: &mut Attributes) -> ParserResult<Element> {
        if is_link(content) {
            let mut parsed = self.tokenize_line(None, content, attributes, false)?;
            if let [Element::Link(link)] = parsed.as_mut_slice() {
                link.options.add_role("inline-code");
                return Ok(Element::Link(link.clone()));
            }
        }
        Ok(Element::Code(Code::inline(content.replace("\\{", "{"))))
    }

    /// Handle the `[` at `open`. Returns the offset to resume the scan from when the bracket
    /// produced a link or a macro.
    fn bracket(
        &mut self,
        elements: &mut Vec<Element>,
        cursor: Option<&mut Cursor>,
        line: &str,
        start: usize,
        open: usize,
        attributes: &mut Attributes,
    ) -> ParserResult<Option<usize>> {
        let bytes = line.as_bytes();
        let Some(mut end) = closing_bracket(bytes, open) else {
            return Ok(None);
        };
        if bytes.get(end + 1) == Some(&b'#') {
            return Ok(None);
        }
        let Some(backward) = macro_start(line, start, open) else {
            return Ok(None);
        };
        let prefix = &line[backward..open];
        flush_text(elements, &line[start..backward]);

        if is_link(prefix) {
            let mut options = parse_block_options(&line[open + 1..end], Some("link"));
            let label = options.remove("").unwrap_or_else(|| prefix.to_string());
            elements.push(Element::Link(Link::new(prefix, label).at(options)));
            return Ok(Some(end + 1));
        }

        let Some(colon) = prefix.find(':') else {
            return Ok(None);
        };
        let inline = bytes.get(backward + colon + 1) != Some(&b':');
        let name = &prefix[..colon];
        let target = &prefix[colon + if inline { 1 } else { 2 }..];
        if name == "link" {
            end = matching_bracket(bytes, open).unwrap_or(end);
        }
        let raw_options = &line[open + 1..end];

        match name {
            "include" => {
                let options = parse_block_options(raw_options, Some(name));
                elements.extend(self.include_elements(target, &options, attributes)?);
            }
            "ifdef" | "ifndef" | "ifeval" => match cursor {
                Some(cursor) => elements.push(self.parse_conditional(
                    cursor,
                    name,
                    target,
                    raw_options,
                    attributes,
                )?),
                None => elements.push(Element::Macro(
                    Macro::new(name, target, inline).at(parse_block_options(raw_options, Some(name))),
                )),
            },
            "stem" => elements.push(Element::Macro(Macro::new(name, raw_options, inline))),
            _ => elements.push(Element::Macro(
                Macro::new(name, target, inline).at(parse_block_options(raw_options, Some(name))),
            )),
        }
        Ok(Some(end + 1))
    }
}

fn find_byte(bytes: &[u8], needle: u8, from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|b| *b == needle)
        .map(|at| at + from)
}

/// First `]` after `open` that is not escaped.
fn closing_bracket(bytes: &[u8], open: usize) -> Option<usize> {
    (open + 1..bytes.len()).find(|&at| bytes[at] == b']' && bytes[at - 1] != b'\\')
}

/// The `]` balancing the `[` at `open`.
fn matching_bracket(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (at, b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(at);
                }
            }
            _ => {}
        }
    }
    None
}

fn after_last_whitespace(text: &str) -> usize {
    text.char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(at, c)| at + c.len_utf8())
}

/// Start of the `name:target` (or url) prefix of the bracket at `open`.
///
/// The whitespace-free token right before the bracket is used when it has a colon past its
/// first character. Otherwise the prefix may be a macro whose target contains spaces
/// (`icon:fas fa-flag[]`): it starts at the word holding the first colon of the run.
fn macro_start(line: &str, start: usize, open: usize) -> Option<usize> {
    let run = &line[start..open];
    let token_start = start + after_last_whitespace(run);
    if line[token_start..open].find(':').is_some_and(|colon| colon > 0) {
        return Some(token_start);
    }

    let colon = start + run.find(':')?;
    let word_start = start + after_last_whitespace(&line[start..colon]);
    let after = line[colon + 1..open].chars().next()?;
    if word_start == colon || after.is_whitespace() {
        return None;
    }
    Some(word_start)
}

/// Whether offset `at` sits inside a bare url of the run starting at `start`.
fn in_autolink(line: &str, start: usize, at: usize) -> bool {
    let token_start = start + after_last_whitespace(&line[start..at]);
    is_link(&line[token_start..at])
}
