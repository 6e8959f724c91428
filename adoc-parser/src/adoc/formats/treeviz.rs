//! Treeviz formatter
//!
//!     One line per element, nesting drawn with box connectors:
//!
//!         ⧉ Guide
//!         ├─ § level 2: About
//!         │ ├─ ◦ About
//!         │ └─ ¶ It is *fast*.
//!         │   ├─ ◦ It is
//!         │   └─ ◦ fast
//!         └─ ☰ unordered-list: 2 items
//!
//!     Each line is `<prefix><connector> <icon> <label>`, the label truncated to 30 characters.
//!     The title line is only written for documents with a header.
//!
//!     Children follow the tree: section titles come before the section content, description
//!     list terms before their description, table cells are grouped under one line per row and
//!     code callouts under their code block.

use super::registry::{FormatError, Formatter};
use crate::adoc::ast::{Document, Element};

const MAX_LABEL: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(element: &Element) -> &'static str {
    match element {
        Element::Paragraph(_) => "¶",
        Element::Section(_) => "§",
        Element::Text(_) => "◦",
        Element::Code(_) => "ƒ",
        Element::Listing(_) => "𝒱",
        Element::Link(_) => "⊕",
        Element::Macro(_) => "⚙",
        Element::Anchor(_) => "⚓",
        Element::Admonition(_) => "⚠",
        Element::Table(_) => "▦",
        Element::Quote(_) => "❝",
        Element::OpenBlock(_) => "➔",
        Element::PassthroughBlock(_) => "℣",
        Element::DescriptionList(_) => "≔",
        Element::OrderedList(_) | Element::UnorderedList(_) => "☰",
        Element::LineBreak(_) => "↵",
        Element::PageBreak(_) => "⇟",
        Element::ConditionalBlock(_) => "⁇",
        Element::AttributeReference(_) => "@",
    }
}

/// Inline text of a sequence of elements, nested containers included.
fn plain_text(elements: &[Element]) -> String {
    let mut text = String::new();
    for element in elements {
        match element {
            Element::Text(it) => text.push_str(&it.value),
            Element::Code(it) if it.inline => text.push_str(&it.value),
            Element::Link(it) if it.label.is_empty() => text.push_str(&it.url),
            Element::Link(it) => text.push_str(&it.label),
            Element::LineBreak(_) => text.push(' '),
            other => text.push_str(&plain_text(other.children())),
        }
    }
    text
}

fn first_line(value: &str) -> &str {
    value.lines().next().unwrap_or_default()
}

fn label(element: &Element) -> String {
    match element {
        Element::Text(it) => it.value.clone(),
        Element::Paragraph(it) => plain_text(&it.children),
        Element::Section(it) => format!(
            "level {}: {}",
            it.level,
            plain_text(std::slice::from_ref(it.title.as_ref()))
        ),
        Element::Code(it) => first_line(&it.value).to_string(),
        Element::Listing(it) | Element::PassthroughBlock(it) => first_line(&it.value).to_string(),
        Element::Link(it) => it.url.clone(),
        Element::Macro(it) => format!("{}:{}", it.name, it.label),
        Element::Anchor(it) => it.id.clone(),
        Element::Admonition(it) => it.level.to_string(),
        Element::Table(it) => format!("{} rows", it.rows.len()),
        Element::DescriptionList(it) => format!("{} items", it.items.len()),
        Element::OrderedList(it) | Element::UnorderedList(it) => {
            format!("{}: {} items", element.kind(), it.children.len())
        }
        Element::Quote(it) | Element::OpenBlock(it) => {
            format!("{}: {} children", element.kind(), it.children.len())
        }
        Element::ConditionalBlock(it) => it.condition.to_string(),
        Element::AttributeReference(it) => it.name.clone(),
        Element::LineBreak(_) | Element::PageBreak(_) => element.kind().to_string(),
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut result = String::new();
    if !doc.header.title.is_empty() {
        result.push_str(&format!("⧉ {}\n", truncate(&doc.header.title, MAX_LABEL)));
    }
    append_children(&mut result, &doc.body.children, "");
    result
}

fn append_line(result: &mut String, prefix: &str, is_last: bool, icon: &str, label: &str) -> String {
    let connector = if is_last { "└─" } else { "├─" };
    result.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        icon,
        truncate(label, MAX_LABEL)
    ));
    format!("{}{}", prefix, if is_last { "  " } else { "│ " })
}

fn append_element(result: &mut String, element: &Element, prefix: &str, is_last: bool) {
    let new_prefix = append_line(result, prefix, is_last, icon(element), &label(element));

    match element {
        Element::Section(section) => {
            let mut children = vec![section.title.as_ref()];
            children.extend(section.children.iter());
            append_refs(result, &children, &new_prefix);
        }
        Element::DescriptionList(list) => {
            let children: Vec<&Element> = list
                .items
                .iter()
                .flat_map(|(term, description)| [term, description])
                .collect();
            append_refs(result, &children, &new_prefix);
        }
        Element::Table(table) => {
            for (i, row) in table.rows.iter().enumerate() {
                let is_last_row = i == table.rows.len() - 1;
                let row_prefix = append_line(
                    result,
                    &new_prefix,
                    is_last_row,
                    "▭",
                    &format!("row {}", i + 1),
                );
                append_children(result, row, &row_prefix);
            }
        }
        Element::Admonition(admonition) => {
            append_refs(result, &[admonition.content.as_ref()], &new_prefix);
        }
        Element::Code(code) => {
            let explanations: Vec<&Element> =
                code.callouts.iter().map(|callout| &callout.explanation).collect();
            append_refs(result, &explanations, &new_prefix);
        }
        other => append_children(result, other.children(), &new_prefix),
    }
}

fn append_children(result: &mut String, children: &[Element], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_element(result, child, prefix, is_last);
    }
}

fn append_refs(result: &mut String, children: &[&Element], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_element(result, child, prefix, is_last);
    }
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn description(&self) -> &str {
        "One line per element tree view"
    }
}
