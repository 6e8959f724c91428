//! Conditional blocks
//!
//!     `ifdef::name[]`, `ifndef::name[]` and `ifeval::[left op right]` open a region closed by
//!     the matching `endif::[]` (`endif::name[]` is accepted too). Regions nest: an inner opener
//!     needs its own `endif` before the outer one can close.
//!
//!     In the body the region becomes a [`ConditionalBlock`] evaluated later by the renderer. In
//!     the header there is no tree to hold it, the condition is evaluated right away.

use crate::adoc::ast::{Condition, ConditionalBlock, Element, Options};
use crate::adoc::attributes::{AttributeLookup, Attributes};
use crate::adoc::cursor::Cursor;
use crate::adoc::error::ParserResult;
use crate::adoc::options::parse_block_options;
use crate::adoc::parsing::engine::Engine;
use crate::adoc::preprocess::expression::parse_condition;
use tracing::debug;

const OPENERS: [&str; 3] = ["ifdef::", "ifndef::", "ifeval::"];

fn is_endif(line: &str) -> bool {
    let stripped = line.trim();
    stripped.starts_with("endif::") && stripped.ends_with(']')
}

/// The lines of a conditional region, the cursor being right after its opening line. The closing
/// `endif` is consumed, nested regions are kept whole.
pub(crate) fn read_if_block(cursor: &mut Cursor) -> Vec<String> {
    let mut lines = Vec::new();
    let mut depth = 1;
    while let Some(next) = cursor.next_line() {
        if is_endif(&next) {
            depth -= 1;
            if depth == 0 {
                break;
            }
        } else if OPENERS.iter().any(|opener| next.trim_start().starts_with(opener)) {
            depth += 1;
        }
        lines.push(next);
    }
    lines
}

/// Build the condition of an `if*` macro. `ifeval` takes its expression from the brackets
/// when nothing stands between `::` and `[`.
pub(crate) fn condition_of(
    name: &str,
    target: &str,
    raw_options: &str,
    snapshot: Options,
) -> ParserResult<Condition> {
    Ok(match name {
        "ifdef" => Condition::Ifdef {
            attribute: target.trim().to_string(),
        },
        "ifndef" => Condition::Ifndef {
            attribute: target.trim().to_string(),
        },
        _ => {
            let expression = if target.trim().is_empty() {
                raw_options
            } else {
                target
            };
            parse_condition(expression, snapshot)?
        }
    })
}

/// Evaluate a header line if it is an `if*` macro, `None` for any other line.
pub(crate) fn header_condition(
    line: &str,
    attributes: &Options,
    context: &dyn AttributeLookup,
) -> Option<ParserResult<bool>> {
    let stripped = line.trim();
    let (name, rest) = stripped.split_once("::")?;
    if !matches!(name, "ifdef" | "ifndef" | "ifeval") || !stripped.ends_with(']') {
        return None;
    }
    let open = rest.find('[')?;
    let target = &rest[..open];
    let raw_options = &rest[open + 1..rest.len() - 1];
    Some(
        condition_of(name, target, raw_options, attributes.clone())
            .and_then(|condition| condition.evaluate(context)),
    )
}

impl Engine<'_> {
    pub(crate) fn parse_conditional(
        &mut self,
        cursor: &mut Cursor,
        name: &str,
        target: &str,
        raw_options: &str,
        attributes: &mut Attributes,
    ) -> ParserResult<Element> {
        let condition = condition_of(name, target, raw_options, attributes.snapshot())?;
        let options = if name == "ifeval" {
            Options::new()
        } else {
            parse_block_options(raw_options, Some(name))
        };
        let lines = read_if_block(cursor);
        debug!(%condition, lines = lines.len(), "conditional block");
        let children = self.parse_lines(lines, attributes, true, true)?;
        Ok(Element::ConditionalBlock(ConditionalBlock {
            condition,
            children,
            options,
        }))
    }
}
