//! Document header
//!
//!     A header starts with a `= Title` (or `# Title`) line, optionally followed by an author
//!     line `Name <mail>` and a revision line `number, date: remark`, then attribute
//!     declarations up to the first blank line:
//!
//!         = Guide
//!         Jane Doe <jane@example.org>
//!         1.0, 2024-01-01: First release
//!         :toc: left
//!         :description: a long \
//!           value on two lines
//!         include::attributes.adoc[]
//!         ifdef::env-github[]
//!         :icons: font
//!         endif::[]
//!
//!     Included files are read as more declarations. Conditionals are evaluated at once against
//!     the attributes declared so far, then the globals: a true region is read as more header
//!     lines, a false one is dropped.

use crate::adoc::ast::{Author, Header, Options, Revision};
use crate::adoc::attributes::{early_attribute_replacement, parse_attribute_definition, Layered};
use crate::adoc::cursor::Cursor;
use crate::adoc::error::{format_source_context, ParserError, ParserResult};
use crate::adoc::options::parse_block_options;
use crate::adoc::parsing::engine::{read_continued_value, Engine};
use crate::adoc::preprocess::conditional::{header_condition, read_if_block};
use crate::adoc::preprocess::include::parse_directive;
use tracing::debug;

/// Starts of lines that are content, never an author or revision line.
const BLOCK_STARTS: [&str; 12] = [
    "* ", "=", "[", ".", "<<", "--", "``", "..", "++", "|==", "> ", "__",
];

fn is_header_candidate(line: &str) -> bool {
    !BLOCK_STARTS.iter().any(|start| line.starts_with(start))
}

fn is_metadata_line(line: &str) -> bool {
    let stripped = line.trim();
    is_header_candidate(stripped)
        && !stripped.starts_with("include:")
        && parse_attribute_definition(stripped).is_none()
        && header_condition(stripped, &Options::new(), &Options::new()).is_none()
}

/// `Jane Doe <jane@example.org>`, the mail being optional.
fn parse_author(line: &str) -> Author {
    let line = line.trim();
    match line.split_once('<') {
        Some((name, rest)) => Author {
            name: name.trim().to_string(),
            mail: rest.trim_end_matches('>').trim().to_string(),
        },
        None => Author {
            name: line.to_string(),
            mail: String::new(),
        },
    }
}

/// `number, date: remark`, every part after the number being optional.
fn parse_revision(line: &str) -> Revision {
    let line = line.trim();
    let (head, remark) = line.split_once(':').unwrap_or((line, ""));
    let (number, date) = head.split_once(',').unwrap_or((head, ""));
    Revision {
        number: number.trim().trim_start_matches('v').to_string(),
        date: date.trim().to_string(),
        remark: remark.trim().to_string(),
    }
}

impl Engine<'_> {
    pub(crate) fn parse_header(&mut self, cursor: &mut Cursor) -> ParserResult<Header> {
        let Some(first) = cursor.skip_blank_and_comments() else {
            cursor.reset();
            return Ok(Header::default());
        };
        let Some(title) = first
            .strip_prefix("= ")
            .or_else(|| first.strip_prefix("# "))
        else {
            cursor.reset();
            return Ok(Header::default());
        };
        let mut header = Header::new(title.trim(), Options::new());

        header.author = self.metadata_line(cursor).map(|line| parse_author(&line));
        if header.author.is_some() {
            header.revision = self.metadata_line(cursor).map(|line| parse_revision(&line));
        }

        let mut attributes = Options::new();
        self.read_attributes(cursor, &mut attributes)?;
        header.attributes = attributes;
        debug!(
            title = %header.title,
            author = header.author.is_some(),
            attributes = header.attributes.len(),
            "header"
        );
        Ok(header)
    }

    /// The next line when it is an author or revision line. A comment is consumed and
    /// counts as that line.
    fn metadata_line(&self, cursor: &mut Cursor) -> Option<String> {
        let line = cursor.next_line()?;
        if Cursor::is_comment(&line) {
            return None;
        }
        if line.trim().is_empty() || !is_metadata_line(&line) {
            cursor.rewind();
            return None;
        }
        Some(line)
    }

    fn read_attributes(&self, cursor: &mut Cursor, attributes: &mut Options) -> ParserResult<()> {
        while let Some(line) = cursor.next_line() {
            let stripped = line.trim();
            if stripped.is_empty() {
                break;
            }
            if Cursor::is_comment(stripped) {
                continue;
            }

            if let Some((name, value)) = parse_attribute_definition(stripped) {
                let value = read_continued_value(value, cursor);
                match name.strip_suffix('!').or_else(|| name.strip_prefix('!')) {
                    Some(name) => {
                        attributes.remove(name);
                    }
                    None => attributes.insert(name, value),
                }
                continue;
            }

            if stripped.starts_with("include::") {
                let Some((target, raw_options)) = parse_directive(stripped) else {
                    return Err(Box::new(ParserError::UnterminatedOptions { line: line.clone() }));
                };
                let lookup = Layered::new(&*attributes, &**self.parser.globals());
                let target = early_attribute_replacement(target, &lookup, true);
                let options = parse_block_options(raw_options, Some("include"));
                let included = self.include_lines(&target, &options)?;
                debug!(%target, lines = included.len(), "header include");
                self.read_attributes(&mut Cursor::new(included), attributes)?;
                continue;
            }

            let context = Layered::new(&*attributes, &**self.parser.globals());
            if let Some(holds) = header_condition(stripped, attributes, &context) {
                let region = read_if_block(cursor);
                if holds? {
                    cursor.insert(region);
                }
                continue;
            }

            if attributes.is_empty() {
                cursor.rewind();
                break;
            }
            let error_line = cursor.line_number().saturating_sub(1);
            return Err(Box::new(ParserError::UnknownHeaderLine {
                line: line.clone(),
                context: format_source_context(cursor.lines(), error_line),
            }));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adoc::resolver::InMemoryResolver;
    use crate::adoc::Parser;
    use rstest::rstest;

    fn header(source: &str) -> ParserResult<(Header, Cursor)> {
        header_with(&Parser::new(), source)
    }

    fn header_with(parser: &Parser, source: &str) -> ParserResult<(Header, Cursor)> {
        let mut engine = Engine::new(parser);
        let mut cursor = Cursor::from_text(source);
        let header = engine.parse_header(&mut cursor)?;
        Ok((header, cursor))
    }

    #[test]
    fn title_author_revision_and_attributes() {
        let (header, mut cursor) = header(
            "= Guide\nJane Doe <jane@example.org>\nv1.0, 2024-01-01: First\n:toc: left\n:long: a \\\n  b\n\nbody",
        )
        .unwrap();
        assert_eq!(header.title, "Guide");
        assert_eq!(
            header.author,
            Some(Author {
                name: "Jane Doe".into(),
                mail: "jane@example.org".into()
            })
        );
        assert_eq!(
            header.revision,
            Some(Revision {
                number: "1.0".into(),
                date: "2024-01-01".into(),
                remark: "First".into()
            })
        );
        assert_eq!(
            header.attributes,
            Options::from([("toc", "left"), ("long", "a b")])
        );
        assert_eq!(cursor.next_line().as_deref(), Some("body"));
    }

    #[test]
    fn markdown_style_title() {
        let (header, _) = header("# Title\n:a: 1").unwrap();
        assert_eq!(header.title, "Title");
        assert_eq!(header.attributes.get("a"), Some("1"));
    }

    #[test]
    fn no_title_means_no_header() {
        let (header, mut cursor) = header("Some text\n:a: b").unwrap();
        assert!(header.is_empty());
        assert_eq!(cursor.next_line().as_deref(), Some("Some text"));
    }

    #[test]
    fn section_after_title_is_content() {
        let (header, mut cursor) = header("= Title\n== Section").unwrap();
        assert_eq!(header.author, None);
        assert_eq!(cursor.next_line().as_deref(), Some("== Section"));
    }

    #[test]
    fn content_before_any_attribute_ends_the_header() {
        let (header, mut cursor) = header("= Title\n\n[.lead]\nIntro").unwrap();
        assert!(header.attributes.is_empty());
        assert_eq!(cursor.skip_blank_and_comments().as_deref(), Some("[.lead]"));
    }

    #[test]
    fn content_after_attributes_is_an_error() {
        let error = header("= Title\n:a: 1\n[.lead]").unwrap_err();
        match *error {
            ParserError::UnknownHeaderLine { line, context } => {
                assert_eq!(line, "[.lead]");
                assert!(context.contains(">>   3 | [.lead]"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unset_attributes() {
        let (header, _) = header("= T\n:a: 1\n:b: 2\n:a!:").unwrap();
        assert_eq!(header.attributes, Options::from([("b", "2")]));
    }

    #[test]
    fn included_attributes() {
        let parser = Parser::new().with_resolver(
            InMemoryResolver::new().with("attrs.adoc", ":included: yes\n:other: value"),
        );
        let (header, _) = header_with(&parser, "= T\n:dir: attrs\ninclude::{dir}.adoc[]\n:after: 1").unwrap();
        assert_eq!(
            header.attributes,
            Options::from([
                ("dir", "attrs"),
                ("included", "yes"),
                ("other", "value"),
                ("after", "1")
            ])
        );
    }

    #[test]
    fn unterminated_include() {
        let error = header("= T\ninclude::attrs.adoc[").unwrap_err();
        assert!(matches!(*error, ParserError::UnterminatedOptions { .. }));
    }

    #[test]
    fn conditionals_are_evaluated_in_place() {
        let parser = Parser::new().with_attributes(Options::from([("env", "ci")]));
        let source = "= T\n:a: 1\nifdef::env[]\n:ci: true\nendif::[]\nifndef::a[]\n:no-a: true\nendif::[]\nifeval::[{a} == 1]\n:one: true\nendif::[]";
        let (header, _) = header_with(&parser, source).unwrap();
        assert_eq!(
            header.attributes,
            Options::from([("a", "1"), ("ci", "true"), ("one", "true")])
        );
    }

    #[rstest]
    #[case("Jane Doe <jane@example.org>", "Jane Doe", "jane@example.org")]
    #[case("Jane Doe", "Jane Doe", "")]
    fn authors(#[case] line: &str, #[case] name: &str, #[case] mail: &str) {
        assert_eq!(
            parse_author(line),
            Author {
                name: name.into(),
                mail: mail.into()
            }
        );
    }
}
