//! Tables
//!
//!     `|===` delimited. A row is either one line holding all its cells (`|a|b|c`) or a run of
//!     `|cell` lines, each possibly continued on the following lines, ended by a blank line.
//!
//!     The `cols` option gives one specifier per column. Its letters select how a cell is
//!     formatted, `<`, `>` and `^` its horizontal alignment:
//!
//!         a       asciidoc, the cell content is parsed as blocks
//!         e       emphasis
//!         s       strong
//!         l, m    literal, inline code (include lines expanded)
//!         h       header text
//!         other   parsed as blocks without complex structures

use crate::adoc::ast::{Code, Container, Element, Options, Styling, Table, Text};
use crate::adoc::attributes::Attributes;
use crate::adoc::cursor::Cursor;
use crate::adoc::error::ParserResult;
use crate::adoc::inlines::text::new_text;
use crate::adoc::parsing::engine::Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellFormat {
    Asciidoc,
    Emphasis,
    Strong,
    Literal,
    Header,
    Default,
}

#[derive(Debug, Clone, PartialEq)]
struct Column {
    format: CellFormat,
    style: Options,
}

impl Column {
    fn parse(spec: &str) -> Self {
        let format = if spec.contains('a') {
            CellFormat::Asciidoc
        } else if spec.contains('e') {
            CellFormat::Emphasis
        } else if spec.contains('s') {
            CellFormat::Strong
        } else if spec.contains('l') || spec.contains('m') {
            CellFormat::Literal
        } else if spec.contains('h') {
            CellFormat::Header
        } else {
            CellFormat::Default
        };
        let align = if spec.contains('^') {
            Some("center")
        } else if spec.contains('>') {
            Some("right")
        } else if spec.contains('<') {
            Some("left")
        } else {
            None
        };
        let style = match align {
            Some(align) => Options::from([(
                "role",
                format!("tableblock halign-{} valign-top", align),
            )]),
            None => Options::new(),
        };
        Self { format, style }
    }
}

fn parse_columns(cols: &str) -> Vec<Column> {
    cols.split(',')
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
        .map(Column::parse)
        .collect()
}

impl Engine<'_> {
    pub(crate) fn parse_table(
        &mut self,
        cursor: &mut Cursor,
        options: Options,
        attributes: &mut Attributes,
        token: &str,
    ) -> ParserResult<Element> {
        let columns = options.get("cols").map(parse_columns).unwrap_or_default();

        let mut rows = Vec::new();
        while let Some(next) = cursor.skip_blank_and_comments() {
            let next = next.trim();
            if next == token {
                break;
            }
            let is_inline_row = next
                .char_indices()
                .any(|(index, c)| index >= 2 && c == '|');
            let row = if is_inline_row {
                self.inline_row(next, &columns, attributes)?
            } else {
                self.multiline_row(cursor, next.to_string(), &columns, attributes)?
            };
            rows.push(row);
        }
        Ok(Element::Table(Table::new(rows, options)))
    }

    fn inline_row(
        &mut self,
        line: &str,
        columns: &[Column],
        attributes: &mut Attributes,
    ) -> ParserResult<Vec<Element>> {
        let mut pieces: Vec<&str> = line.strip_prefix('|').unwrap_or(line).split('|').collect();
        if pieces.last().is_some_and(|last| last.trim().is_empty()) {
            pieces.pop();
        }
        pieces
            .into_iter()
            .enumerate()
            .map(|(index, piece)| {
                self.format_cell(columns.get(index), vec![piece.trim().to_string()], attributes)
            })
            .collect()
    }

    /// One `|cell` line after the other, until a blank line or the end of the table.
    fn multiline_row(
        &mut self,
        cursor: &mut Cursor,
        first: String,
        columns: &[Column],
        attributes: &mut Attributes,
    ) -> ParserResult<Vec<Element>> {
        let mut cells = Vec::new();
        let mut current = first;
        loop {
            let mut content = vec![current.strip_prefix('|').unwrap_or(&current).to_string()];
            while let Some(next) = cursor.next_line() {
                if next.starts_with('|') || next.trim().is_empty() {
                    cursor.rewind();
                    break;
                }
                content.push(next.trim().to_string());
            }
            cells.push(self.format_cell(columns.get(cells.len()), content, attributes)?);

            match cursor.next_line() {
                Some(next) if next.trim().is_empty() => break,
                Some(next) if next.starts_with("|===") => {
                    cursor.rewind();
                    break;
                }
                Some(next) => current = next,
                None => break,
            }
        }
        Ok(cells)
    }

    fn format_cell(
        &mut self,
        column: Option<&Column>,
        content: Vec<String>,
        attributes: &mut Attributes,
    ) -> ParserResult<Element> {
        let Some(column) = column else {
            return Ok(new_text(Vec::new(), content.join("\n").trim(), Options::new()));
        };
        let style = column.style.clone();
        Ok(match column.format {
            CellFormat::Asciidoc => self.cell_blocks(content, attributes, true, style)?,
            CellFormat::Default => self.cell_blocks(content, attributes, false, style)?,
            CellFormat::Emphasis => {
                Element::Text(Text::styled(vec![Styling::Emphasis], content.join("\n")).at(style))
            }
            CellFormat::Strong => {
                Element::Text(Text::styled(vec![Styling::Bold], content.join("\n")).at(style))
            }
            CellFormat::Literal => {
                let lines = self.expand_includes(&content, attributes, true)?;
                let mut code = Code::inline(lines.join("\n"));
                code.options = style;
                Element::Code(code)
            }
            CellFormat::Header => {
                let role = format!("header {}", style.role().unwrap_or_default());
                new_text(
                    Vec::new(),
                    &content.join("\n"),
                    Options::from([("role", role.trim_end())]),
                )
            }
        })
    }

    fn cell_blocks(
        &mut self,
        content: Vec<String>,
        attributes: &mut Attributes,
        complex: bool,
        style: Options,
    ) -> ParserResult<Element> {
        let mut elements = self.parse_lines(content, attributes, complex, true)?;
        Ok(match elements.len() {
            1 => elements.remove(0),
            _ => Element::Paragraph(Container::with_options(elements, style)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adoc::Parser;

    fn table(source: &str) -> Table {
        let parser = Parser::new();
        let mut engine = Engine::new(&parser);
        let mut attributes = Attributes::default();
        let elements = engine
            .parse_lines(
                source.lines().map(str::to_string).collect(),
                &mut attributes,
                true,
                true,
            )
            .unwrap();
        match elements.as_slice() {
            [Element::Table(table)] => table.clone(),
            other => panic!("expected a single table, got {other:?}"),
        }
    }

    fn texts(values: &[&str]) -> Vec<Element> {
        values.iter().map(|value| Element::text(*value)).collect()
    }

    #[test]
    fn single_line_rows() {
        let table = table("|===\n|a|b\n|c | d|\n|===");
        assert_eq!(table.rows, vec![texts(&["a", "b"]), texts(&["c", "d"])]);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn one_cell_per_line_rows() {
        let table = table("|===\n|a\n|b\ncontinued\n\n|c\n|d\n|===");
        assert_eq!(
            table.rows,
            vec![texts(&["a", "b\ncontinued"]), texts(&["c", "d"])]
        );
    }

    #[test]
    fn asciidoc_column_parses_blocks() {
        let table = table("[cols=\"1,2a\"]\n|===\n|x|* one\n|===");
        assert_eq!(
            table.rows,
            vec![vec![
                Element::text("x"),
                Element::unordered_list(texts(&["one"])),
            ]]
        );
        assert_eq!(table.options.get("cols"), Some("1,2a"));
    }

    #[test]
    fn column_formatters() {
        let table = table("[cols=\"e,s,h,m\"]\n|===\n|a|b|c|{d}\n|===");
        assert_eq!(
            table.rows,
            vec![vec![
                Element::styled_text(vec![Styling::Emphasis], "a"),
                Element::styled_text(vec![Styling::Bold], "b"),
                Element::Text(Text::new("c").at(Options::from([("role", "header")]))),
                Element::Code(Code::inline("{d}")),
            ]]
        );
    }

    #[test]
    fn alignment_sets_the_cell_role() {
        let table = table("[cols=\"^s,>h\"]\n|===\n|a|b\n|===");
        assert_eq!(
            table.rows,
            vec![vec![
                Element::Text(Text::styled(vec![Styling::Bold], "a").at(Options::from([(
                    "role",
                    "tableblock halign-center valign-top"
                )]))),
                Element::Text(Text::new("b").at(Options::from([(
                    "role",
                    "header tableblock halign-right valign-top"
                )]))),
            ]]
        );
    }

    #[test]
    fn comments_and_blank_lines_between_rows_are_skipped() {
        let table = table("|===\n// header\n|a|b\n\n|c|d\n|===");
        assert_eq!(table.rows.len(), 2);
    }
}
