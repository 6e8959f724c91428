//! Code blocks
//!
//!     `----` or ```` ``` ```` delimited, the content is kept verbatim (one `\n` per line, the
//!     last one included) once `include::` lines are expanded.
//!
//!     Callout markers `<1>` in the code are rewritten to `(1)` and must be explained right after
//!     the block by one `<n> explanation` line per marker, in increasing order (`<.>` takes the
//!     next number). Any other count or numbering is an error.

use crate::adoc::ast::{CallOut, Code, Element, Options};
use crate::adoc::attributes::Attributes;
use crate::adoc::cursor::Cursor;
use crate::adoc::error::{ParserError, ParserResult};
use crate::adoc::parsing::delimited::apply_subs;
use crate::adoc::parsing::engine::Engine;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeSet;
use tracing::debug;

static CALLOUT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(\d+)>").unwrap());
static CALLOUT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<([\d.]+)> (.+)$").unwrap());

impl Engine<'_> {
    pub(crate) fn parse_code_block(
        &mut self,
        cursor: &mut Cursor,
        options: Options,
        attributes: &mut Attributes,
        fence: &str,
    ) -> ParserResult<Element> {
        let mut lines = Vec::new();
        while let Some(next) = cursor.next_line() {
            if next.trim() == fence {
                break;
            }
            lines.push(next);
        }
        let code: String = self
            .expand_includes(&lines, attributes, false)?
            .into_iter()
            .map(|line| line + "\n")
            .collect();

        let (rewritten, markers) = rewrite_callout_markers(&code)?;
        if markers.is_empty() {
            let value = apply_subs(&code, &options, attributes);
            return Ok(Element::Code(Code::block(value, options)));
        }

        let callouts = self.parse_callouts(cursor, attributes)?;
        if !callouts
            .iter()
            .map(|callout| callout.number)
            .eq(markers.iter().copied())
        {
            return Err(Box::new(ParserError::CalloutMismatch {
                markers: markers.len(),
                descriptions: callouts.len(),
                snippet: code,
            }));
        }
        debug!(callouts = callouts.len(), "code block with callouts");
        let value = apply_subs(rewritten.trim_end(), &options, attributes);
        Ok(Element::Code(Code::block(value, options).with_callouts(callouts)))
    }

    fn parse_callouts(
        &mut self,
        cursor: &mut Cursor,
        attributes: &mut Attributes,
    ) -> ParserResult<Vec<CallOut>> {
        let mut callouts = Vec::new();
        while let Some(next) = cursor.skip_blank_and_comments() {
            let Some(captures) = CALLOUT.captures(&next) else {
                cursor.rewind();
                break;
            };
            let number = match &captures[1] {
                "." => callouts.len() as u32 + 1,
                number => number.parse::<u32>().map_err(|_| {
                    Box::new(ParserError::InvalidCallout {
                        line: next.clone(),
                    })
                })?,
            };

            let mut lines = vec![captures[2].to_string()];
            while let Some(line) = cursor.next_line() {
                if line.trim().is_empty() {
                    break;
                }
                if line.starts_with('<') {
                    cursor.rewind();
                    break;
                }
                lines.push(line);
            }
            let mut elements = self.parse_lines(lines, attributes, true, false)?;
            let explanation = match elements.len() {
                1 => elements.remove(0),
                _ => Element::paragraph(elements),
            };
            callouts.push(CallOut::new(number, explanation));
        }
        Ok(callouts)
    }
}

/// Rewrite `<n>` markers to `(n)`, returning the distinct marker numbers.
fn rewrite_callout_markers(code: &str) -> ParserResult<(String, BTreeSet<u32>)> {
    let mut markers = BTreeSet::new();
    for captures in CALLOUT_MARKER.captures_iter(code) {
        let number = captures[1].parse::<u32>().map_err(|_| {
            Box::new(ParserError::InvalidCallout {
                line: captures[0].to_string(),
            })
        })?;
        markers.insert(number);
    }
    if markers.is_empty() {
        return Ok((code.to_string(), markers));
    }
    let rewritten = CALLOUT_MARKER.replace_all(code, |captures: &Captures| format!("({})", &captures[1]));
    Ok((rewritten.into_owned(), markers))
}
