//! Sections
//!
//!     A section title is a line of `=` followed by its title. The section owns every block up to
//!     the next title of the same or a higher level; deeper titles become nested sections through
//!     the recursive dispatch of its children.

use crate::adoc::ast::{Container, Element, Options, Section};
use crate::adoc::attributes::Attributes;
use crate::adoc::cursor::Cursor;
use crate::adoc::error::{ParserError, ParserResult};
use crate::adoc::parsing::engine::Engine;
use tracing::debug;

impl Engine<'_> {
    pub(crate) fn parse_section(
        &mut self,
        cursor: &mut Cursor,
        options: Options,
        attributes: &mut Attributes,
    ) -> ParserResult<Element> {
        let title_line = cursor.skip_blank_and_comments().unwrap_or_default();
        let marks = title_line.chars().take_while(|c| *c == '=').count();
        let level = match attributes.get("leveloffset") {
            Some(offset) => {
                let offset = offset
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| Box::new(ParserError::invalid_number(offset, "leveloffset")))?;
                (marks as i64 + offset).max(0) as usize
            }
            None => marks,
        };
        attributes.set("sectnumlevels", level.to_string());

        let mut title = self.tokenize_line(None, title_line[marks..].trim(), attributes, false)?;
        let title = match title.len() {
            1 => title.remove(0),
            _ => Element::Paragraph(Container::with_options(
                title,
                Options::from([("nowrap", "true")]),
            )),
        };
        debug!(level, %title, "section");

        let deeper = "=".repeat(marks + 1);
        let children = self.parse_blocks(
            cursor,
            &|line| !line.starts_with('=') || line.starts_with(deeper.as_str()),
            attributes,
            true,
            true,
        )?;
        Ok(Element::Section(Section::new(level, title, children).at(options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adoc::ast::{Styling, Text};
    use crate::adoc::Parser;

    fn sections(source: &str, attributes: &mut Attributes) -> ParserResult<Vec<Element>> {
        let parser = Parser::new();
        let mut engine = Engine::new(&parser);
        engine.parse_lines(
            source.lines().map(str::to_string).collect(),
            attributes,
            true,
            true,
        )
    }

    #[test]
    fn nested_and_sibling_sections() {
        let elements = sections(
            "== One\n\nfirst\n\n=== One.One\n\nnested\n\n== Two\n\nsecond",
            &mut Attributes::default(),
        )
        .unwrap();
        assert_eq!(
            elements,
            vec![
                Element::Section(Section::new(
                    2,
                    Element::text("One"),
                    vec![
                        Element::text("first"),
                        Element::Section(Section::new(
                            3,
                            Element::text("One.One"),
                            vec![Element::text("nested")]
                        )),
                    ]
                )),
                Element::Section(Section::new(
                    2,
                    Element::text("Two"),
                    vec![Element::text("second")]
                )),
            ]
        );
    }

    #[test]
    fn styled_title_is_a_nowrap_paragraph() {
        let elements = sections("== A *bold* title", &mut Attributes::default()).unwrap();
        let Element::Section(section) = &elements[0] else {
            panic!("expected a section");
        };
        assert_eq!(
            *section.title,
            Element::Paragraph(Container::with_options(
                vec![
                    Element::text("A "),
                    Element::styled_text(vec![Styling::Bold], "bold"),
                    Element::text(" title"),
                ],
                Options::from([("nowrap", "true")])
            ))
        );
    }

    #[test]
    fn colon_in_title() {
        let elements = sections("== Note: read this", &mut Attributes::default()).unwrap();
        assert_eq!(
            elements,
            vec![Element::Section(Section::new(
                2,
                Element::text("Note: read this"),
                vec![]
            ))]
        );
    }

    #[test]
    fn title_anchor_becomes_id() {
        let elements = sections("== Model [[model]]", &mut Attributes::default()).unwrap();
        assert_eq!(
            elements,
            vec![Element::Section(Section::new(
                2,
                Element::Text(Text::new("Model").at(Options::from([("id", "model")]))),
                vec![]
            ))]
        );
    }

    #[test]
    fn level_offset_and_section_levels() {
        let mut attributes = Attributes::default();
        attributes.set("leveloffset", "+1");
        let elements = sections("== A\n\n=== B", &mut attributes).unwrap();
        let Element::Section(section) = &elements[0] else {
            panic!("expected a section");
        };
        assert_eq!(section.level, 3);
        assert!(matches!(&section.children[0], Element::Section(child) if child.level == 4));
        assert_eq!(attributes.get("sectnumlevels"), Some("4"));
    }

    #[test]
    fn invalid_level_offset() {
        let mut attributes = Attributes::default();
        attributes.set("leveloffset", "two");
        let error = sections("== A", &mut attributes).unwrap_err();
        assert!(matches!(
            error.root_cause(),
            ParserError::InvalidNumber { context: "leveloffset", .. }
        ));
    }
}
