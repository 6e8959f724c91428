//! Paragraphs
//!
//!     A paragraph is the run of non-blank lines up to a blank line or a line opening another
//!     block. Each line goes through the tokenizer with the paragraph's cursor, so a line may turn
//!     into a whole list or admonition.
//!
//!     The tokenizer wraps everything it produces in a paragraph. [`unwrap_paragraph`] removes
//!     that wrapper when it holds a single structural child, moving the paragraph options onto
//!     the child.

use crate::adoc::ast::{Container, Element, Options};
use crate::adoc::attributes::{early_attribute_replacement, Attributes};
use crate::adoc::cursor::Cursor;
use crate::adoc::error::ParserResult;
use crate::adoc::inlines::join_texts;
use crate::adoc::parsing::engine::Engine;

impl Engine<'_> {
    pub(crate) fn parse_paragraph(
        &mut self,
        cursor: &mut Cursor,
        options: Options,
        attributes: &mut Attributes,
        complex: bool,
    ) -> ParserResult<Container> {
        let mut elements = Vec::new();
        let mut first = true;
        while let Some(line) = cursor.next_line() {
            if line.trim().is_empty() {
                break;
            }
            if !first && opens_block(&line) {
                cursor.rewind();
                break;
            }
            first = false;
            let line = early_attribute_replacement(&line, attributes, false);
            elements.extend(self.tokenize_line(Some(cursor), &line, attributes, complex)?);
        }

        if options.is_empty() && matches!(elements.as_slice(), [Element::Paragraph(_)]) {
            if let Some(Element::Paragraph(inner)) = elements.pop() {
                return Ok(inner);
            }
        }
        Ok(Container::with_options(join_texts(elements), options))
    }
}

/// Lines that end a paragraph because another block starts there.
fn opens_block(line: &str) -> bool {
    if line.starts_with('=') || (line.starts_with('[') && line.ends_with(']')) {
        return true;
    }
    if ["ifdef::", "ifndef::", "ifeval::"]
        .iter()
        .any(|opener| line.starts_with(opener))
    {
        return true;
    }
    let stripped = line.trim();
    matches!(stripped, "----" | "```" | "...." | "++++" | "--" | "<<<")
        || stripped.starts_with("____")
        || stripped.starts_with("|===")
}

/// Replace a single child paragraph by its child when the child can carry the options itself.
///
/// The paragraph options are merged over the child's. Description lists and admonitions are
/// only unwrapped from an option-less paragraph, line breaks always, anything else never.
pub fn unwrap_paragraph(paragraph: Container) -> Element {
    let Container { children, options } = paragraph;
    let child = match <[Element; 1]>::try_from(children) {
        Ok([child]) => child,
        Err(children) => return Element::Paragraph(Container::with_options(children, options)),
    };
    match child {
        Element::UnorderedList(_)
        | Element::OrderedList(_)
        | Element::Section(_)
        | Element::Text(_)
        | Element::Code(_)
        | Element::Link(_)
        | Element::Macro(_)
        | Element::Quote(_)
        | Element::OpenBlock(_)
        | Element::PageBreak(_)
        | Element::ConditionalBlock(_) => {
            let mut child = child;
            child.options_mut().merge(&options);
            child
        }
        Element::LineBreak(_) => child,
        Element::DescriptionList(_) | Element::Admonition(_) if options.is_empty() => child,
        other => Element::Paragraph(Container::with_options(vec![other], options)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adoc::ast::{Admonition, AdmonitionLevel, Anchor, Styling, Text};
    use crate::adoc::Parser;

    fn paragraph(source: &str) -> Container {
        let parser = Parser::new();
        let mut engine = Engine::new(&parser);
        let mut attributes = Attributes::default();
        engine
            .parse_paragraph(
                &mut Cursor::from_text(source),
                Options::new(),
                &mut attributes,
                true,
            )
            .unwrap()
    }

    #[test]
    fn lines_are_joined_with_a_space() {
        assert_eq!(
            paragraph("first line\nsecond line").children,
            vec![Element::text("first line second line")]
        );
    }

    #[test]
    fn stops_at_blank_line_and_block_start() {
        let parser = Parser::new();
        let mut engine = Engine::new(&parser);
        let mut attributes = Attributes::default();
        let mut cursor = Cursor::from_text("text\n----\ncode\n----");
        let container = engine
            .parse_paragraph(&mut cursor, Options::new(), &mut attributes, true)
            .unwrap();
        assert_eq!(container.children, vec![Element::text("text")]);
        assert_eq!(cursor.next_line().as_deref(), Some("----"));
    }

    #[test]
    fn mixed_inline_content() {
        assert_eq!(
            paragraph("This *is* a <<ref,link>>.").children,
            vec![
                Element::text("This "),
                Element::styled_text(vec![Styling::Bold], "is"),
                Element::text(" a "),
                Element::Anchor(Anchor::new("ref", "link")),
                Element::text("."),
            ]
        );
    }

    #[test]
    fn paragraph_options_win_when_unwrapping() {
        let container = Container::with_options(
            vec![Element::Text(Text::new("a").at(Options::from([("role", "inner"), ("id", "x")])))],
            Options::from([("role", "outer")]),
        );
        assert_eq!(
            unwrap_paragraph(container),
            Element::Text(Text::new("a").at(Options::from([("role", "outer"), ("id", "x")])))
        );
    }

    #[test]
    fn admonitions_need_an_option_less_paragraph() {
        let admonition = Element::Admonition(Admonition::new(
            AdmonitionLevel::Note,
            Element::text("x"),
        ));
        assert_eq!(
            unwrap_paragraph(Container::new(vec![admonition.clone()])),
            admonition
        );
        let kept = unwrap_paragraph(Container::with_options(
            vec![admonition],
            Options::from([("role", "r")]),
        ));
        assert!(matches!(kept, Element::Paragraph(_)));
    }

    #[test]
    fn several_children_stay_a_paragraph() {
        let container = Container::new(vec![Element::text("a"), Element::line_break()]);
        assert_eq!(
            unwrap_paragraph(container.clone()),
            Element::Paragraph(container)
        );
    }
}
