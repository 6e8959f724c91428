//! Include resolution
//!
//!     `include::target[options]` is resolved through the parser's
//!     [`ContentResolver`](crate::adoc::resolver::ContentResolver). The resolved lines are then
//!     narrowed and reshaped by the options, in this order:
//!
//!         lines=1;3..5        1-based line numbers and inclusive ranges (`-1` is the end)
//!         tag=T / tags=A;B    lines between the `tag::T[]` and `end::T[]` markers
//!         leveloffset=+1      shift the level of section titles
//!         indent=2            strip the indentation and indent by that many spaces
//!
//!     An include inline in a paragraph is parsed as blocks, inside verbatim blocks only its
//!     lines are spliced in.

use crate::adoc::ast::{Element, Options};
use crate::adoc::attributes::{early_attribute_replacement, Attributes};
use crate::adoc::error::{ParserError, ParserResult};
use crate::adoc::options::parse_block_options;
use crate::adoc::parsing::engine::Engine;
use tracing::{debug, warn};

const DIRECTIVE: &str = "include::";

/// `include::target[options]` on its own line, split into its target and raw options.
pub(crate) fn parse_directive(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix(DIRECTIVE)?;
    let open = rest.find('[')?;
    let close = open + rest[open..].find(']')?;
    Some((&rest[..open], &rest[open + 1..close]))
}

fn is_optional(options: &Options) -> bool {
    options.contains_key("optional")
        || options.get("") == Some("optional")
        || options
            .get("opts")
            .is_some_and(|opts| opts.split_whitespace().any(|flag| flag == "optional"))
}

impl Engine<'_> {
    /// Replace every `include::` line by the lines it designates.
    ///
    /// In `lenient` mode an include that fails to resolve is logged and its line kept as is.
    pub(crate) fn expand_includes(
        &mut self,
        lines: &[String],
        attributes: &Attributes,
        lenient: bool,
    ) -> ParserResult<Vec<String>> {
        let mut expanded = Vec::with_capacity(lines.len());
        for line in lines {
            let Some((target, raw_options)) = parse_directive(line) else {
                expanded.push(line.clone());
                continue;
            };
            let options = parse_block_options(raw_options, Some("include"));
            let target = substitute_target(target, &options, attributes);
            match self.include_lines(&target, &options) {
                Ok(included) => expanded.extend(included),
                Err(error) if lenient => {
                    warn!(%target, %error, "include left as is");
                    expanded.push(line.clone());
                }
                Err(error) => return Err(error),
            }
        }
        Ok(expanded)
    }

    /// Resolve an include and parse its content as blocks with the current attributes.
    pub(crate) fn include_elements(
        &mut self,
        target: &str,
        options: &Options,
        attributes: &mut Attributes,
    ) -> ParserResult<Vec<Element>> {
        let target = substitute_target(target, options, attributes);
        let lines = self.include_lines(&target, options)?;
        self.parse_lines(lines, attributes, true, true)
    }

    /// The lines of an include once its options are applied.
    pub(crate) fn include_lines(&self, target: &str, options: &Options) -> ParserResult<Vec<String>> {
        let encoding = options
            .get("encoding")
            .or_else(|| self.parser.include_encoding());
        let resolved = match self.parser.resolver() {
            Some(resolver) => resolver.resolve(target, encoding),
            None if is_optional(options) => None,
            None => {
                return Err(Box::new(ParserError::NoResolver {
                    target: target.to_string(),
                }))
            }
        };
        let content = match resolved {
            Some(content) => content,
            None if is_optional(options) => {
                debug!(target, "optional include not found");
                return Ok(Vec::new());
            }
            None => {
                return Err(Box::new(ParserError::MissingInclude {
                    target: target.to_string(),
                }))
            }
        };
        debug!(target, lines = content.len(), "include resolved");

        let mut content = content;
        if let Some(lines) = options.get("lines").filter(|it| !it.trim().is_empty()) {
            content = select_lines(&content, lines)?;
        }
        if let Some(tags) = options.get("tag").or_else(|| options.get("tags")) {
            content = select_tags(&content, tags);
        }
        if let Some(offset) = options.get("leveloffset").filter(|it| !it.trim().is_empty()) {
            let offset = offset
                .trim()
                .parse::<i64>()
                .map_err(|_| Box::new(ParserError::invalid_number(offset, "include leveloffset")))?;
            content = shift_sections(content, offset);
        }
        if let Some(indent) = options.get("indent") {
            let indent = indent
                .trim()
                .parse::<usize>()
                .map_err(|_| Box::new(ParserError::invalid_number(indent, "include indent")))?;
            content = reindent(content, indent);
        }
        Ok(content)
    }
}

/// Attribute references in a target are resolved unless `subs` contains `-macro`.
fn substitute_target(target: &str, options: &Options, attributes: &Attributes) -> String {
    if options.get("subs").is_some_and(|subs| subs.contains("-macro")) {
        return target.to_string();
    }
    early_attribute_replacement(target, attributes, true)
}

fn line_number(value: &str) -> ParserResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| Box::new(ParserError::invalid_number(value, "include lines")))
}

fn select_lines(content: &[String], spec: &str) -> ParserResult<Vec<String>> {
    let count = content.len();
    let mut selected = Vec::new();
    for range in spec.split([',', ';']).map(str::trim).filter(|it| !it.is_empty()) {
        match range.split_once("..") {
            Some((from, to)) => {
                let from = (line_number(from)?.max(1) as usize - 1).min(count);
                let to = match line_number(to)? {
                    -1 => count,
                    to => (to.max(0) as usize).min(count),
                };
                if from < to {
                    selected.extend_from_slice(&content[from..to]);
                }
            }
            None => {
                let number = line_number(range)?;
                if number >= 1 && number as usize <= count {
                    selected.push(content[number as usize - 1].clone());
                }
            }
        }
    }
    Ok(selected)
}

/// Lines between `tag::T[]` and `end::T[]` for every tag of a `,` or `;` separated list, in
/// list order.
fn select_tags(content: &[String], tags: &str) -> Vec<String> {
    let mut selected = Vec::new();
    for tag in tags.split([',', ';']).map(str::trim).filter(|it| !it.is_empty()) {
        let start_marker = format!("tag::{}[]", tag);
        let end_marker = format!("end::{}[]", tag);
        let Some(start) = content.iter().position(|line| line.contains(&start_marker)) else {
            continue;
        };
        let Some(length) = content[start + 1..]
            .iter()
            .position(|line| line.contains(&end_marker))
        else {
            continue;
        };
        selected.extend_from_slice(&content[start + 1..start + 1 + length]);
    }
    selected
}

/// Level of a section title line: its leading `=` directly followed by a space.
fn find_section_level(line: &str) -> Option<usize> {
    let space = line.find(' ')?;
    (space > 0 && line[..space].bytes().all(|b| b == b'=')).then_some(space)
}

fn shift_sections(content: Vec<String>, offset: i64) -> Vec<String> {
    if offset == 0 {
        return content;
    }
    content
        .into_iter()
        .map(|line| match find_section_level(&line) {
            Some(_) if offset > 0 => format!("{}{}", "=".repeat(offset as usize), line),
            Some(level) => {
                let removed = (offset.unsigned_abs() as usize).min(level - 1);
                line[removed..].to_string()
            }
            None => line,
        })
        .collect()
}

fn reindent(content: Vec<String>, indent: usize) -> Vec<String> {
    let padding = " ".repeat(indent);
    content
        .into_iter()
        .map(|line| {
            let stripped = line.trim_start();
            if stripped.is_empty() {
                String::new()
            } else {
                format!("{}{}", padding, stripped)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adoc::resolver::InMemoryResolver;
    use crate::adoc::Parser;
    use rstest::rstest;

    const SNIPPET: &str = "line 1\n# tag::a[]\ninside a\n# end::a[]\n// tag::b[]\ninside b\n// end::b[]\nline 8";

    fn parser() -> Parser {
        Parser::new().with_resolver(
            InMemoryResolver::new()
                .with("snippet.txt", SNIPPET)
                .with("chapter.adoc", "= Chapter\n\n== Part\n\ntext")
                .with("code.rs", "fn main() {\n    run();\n}"),
        )
    }

    fn include(target: &str, raw_options: &str) -> ParserResult<Vec<String>> {
        let parser = parser();
        let engine = Engine::new(&parser);
        engine.include_lines(target, &parse_block_options(raw_options, Some("include")))
    }

    #[rstest]
    #[case("lines=1", &["line 1"])]
    #[case("lines=1;8", &["line 1", "line 8"])]
    #[case("lines=7..-1", &["// end::b[]", "line 8"])]
    #[case("lines=\"2..3,8\"", &["# tag::a[]", "inside a", "line 8"])]
    #[case("lines=6..100", &["inside b", "// end::b[]", "line 8"])]
    #[case("tag=a", &["inside a"])]
    #[case("tags=a;b", &["inside a", "inside b"])]
    #[case("tags=\"b,a\"", &["inside b", "inside a"])]
    #[case("tag=missing", &[])]
    fn narrowing(#[case] raw_options: &str, #[case] expected: &[&str]) {
        assert_eq!(include("snippet.txt", raw_options).unwrap(), expected);
    }

    #[test]
    fn invalid_line_number() {
        let error = include("snippet.txt", "lines=a..2").unwrap_err();
        assert!(matches!(*error, ParserError::InvalidNumber { context: "include lines", .. }));
    }

    #[test]
    fn level_offset() {
        assert_eq!(
            include("chapter.adoc", "leveloffset=+1").unwrap(),
            ["== Chapter", "", "=== Part", "", "text"]
        );
        assert_eq!(
            include("chapter.adoc", "leveloffset=-1").unwrap(),
            ["= Chapter", "", "= Part", "", "text"]
        );
        let error = include("chapter.adoc", "leveloffset=x").unwrap_err();
        assert!(matches!(*error, ParserError::InvalidNumber { .. }));
    }

    #[test]
    fn indent() {
        assert_eq!(
            include("code.rs", "indent=2").unwrap(),
            ["  fn main() {", "  run();", "  }"]
        );
        assert_eq!(
            include("code.rs", "indent=0").unwrap(),
            ["fn main() {", "run();", "}"]
        );
    }

    #[test]
    fn missing_and_optional() {
        let error = include("nope.adoc", "").unwrap_err();
        assert_eq!(
            *error,
            ParserError::MissingInclude {
                target: "nope.adoc".into()
            }
        );
        assert!(include("nope.adoc", "opts=optional").unwrap().is_empty());
        assert!(include("nope.adoc", "%optional").unwrap().is_empty());
        assert!(include("nope.adoc", "optional").unwrap().is_empty());
    }

    #[test]
    fn no_resolver() {
        let parser = Parser::new();
        let engine = Engine::new(&parser);
        let error = engine.include_lines("a.adoc", &Options::new()).unwrap_err();
        assert!(matches!(*error, ParserError::NoResolver { .. }));
        let optional = Options::from([("opts", "optional")]);
        assert!(engine.include_lines("a.adoc", &optional).unwrap().is_empty());
    }

    #[test]
    fn directive_lines() {
        assert_eq!(
            parse_directive("include::{dir}/a.adoc[lines=1]"),
            Some(("{dir}/a.adoc", "lines=1"))
        );
        assert_eq!(parse_directive("  include::a.adoc[]"), Some(("a.adoc", "")));
        assert_eq!(parse_directive("include::a.adoc"), None);
        assert_eq!(parse_directive("see include::a.adoc[]"), None);
    }

    #[test]
    fn expansion_substitutes_the_target() {
        let parser = parser();
        let mut engine = Engine::new(&parser);
        let mut attributes = Attributes::default();
        attributes.set("name", "code");
        let lines = vec!["before".to_string(), "include::{name}.rs[lines=2]".to_string()];
        assert_eq!(
            engine.expand_includes(&lines, &attributes, false).unwrap(),
            ["before", "    run();"]
        );
    }

    #[test]
    fn lenient_expansion_keeps_failing_lines() {
        let parser = parser();
        let mut engine = Engine::new(&parser);
        let lines = vec!["include::nope.adoc[]".to_string()];
        assert_eq!(
            engine
                .expand_includes(&lines, &Attributes::default(), true)
                .unwrap(),
            lines
        );
        assert!(engine
            .expand_includes(&lines, &Attributes::default(), false)
            .is_err());
    }

    #[test]
    fn included_blocks_are_parsed() {
        let parser = parser();
        let mut engine = Engine::new(&parser);
        let elements = engine
            .include_elements("snippet.txt", &Options::from([("lines", "1")]), &mut Attributes::default())
            .unwrap();
        assert_eq!(elements, vec![Element::text("line 1")]);
    }
}
