//! Tree traversal
//!
//! This module defines the [`Visitor`] interface tree consumers implement, and [`walk`] which
//! drives it in document order.

use super::document::Document;
use super::elements::{
    Admonition, Anchor, AttributeReference, Code, ConditionalBlock, Container, DescriptionList,
    Element, Link, Macro, Section, Table, Text, Verbatim,
};
use super::options::Options;

/// Visitor trait for traversing the document tree
///
/// Implement this trait to walk the tree. Each visit method corresponds to an element variant,
/// containers also get a leave method once their children were walked. Default implementations
/// are empty, so you only need to override the methods you care about.
///
/// # Example
///
/// ```ignore
/// struct SectionCounter(usize);
///
/// impl Visitor for SectionCounter {
///     fn visit_section(&mut self, _section: &Section) {
///         self.0 += 1;
///     }
/// }
///
/// let mut counter = SectionCounter(0);
/// document.accept(&mut counter);
/// ```
pub trait Visitor {
    // Containers
    fn visit_paragraph(&mut self, _paragraph: &Container) {}
    fn leave_paragraph(&mut self, _paragraph: &Container) {}

    fn visit_section(&mut self, _section: &Section) {}
    fn leave_section(&mut self, _section: &Section) {}

    fn visit_list(&mut self, _list: &Container, _ordered: bool) {}
    fn leave_list(&mut self, _list: &Container, _ordered: bool) {}

    fn visit_description_list(&mut self, _list: &DescriptionList) {}
    fn leave_description_list(&mut self, _list: &DescriptionList) {}

    fn visit_table(&mut self, _table: &Table) {}
    fn leave_table(&mut self, _table: &Table) {}

    fn visit_quote(&mut self, _quote: &Container) {}
    fn leave_quote(&mut self, _quote: &Container) {}

    fn visit_open_block(&mut self, _block: &Container) {}
    fn leave_open_block(&mut self, _block: &Container) {}

    fn visit_admonition(&mut self, _admonition: &Admonition) {}
    fn leave_admonition(&mut self, _admonition: &Admonition) {}

    fn visit_conditional_block(&mut self, _block: &ConditionalBlock) {}
    fn leave_conditional_block(&mut self, _block: &ConditionalBlock) {}

    // Leaves
    fn visit_text(&mut self, _text: &Text) {}
    fn visit_code(&mut self, _code: &Code) {}
    fn visit_listing(&mut self, _listing: &Verbatim) {}
    fn visit_passthrough(&mut self, _passthrough: &Verbatim) {}
    fn visit_link(&mut self, _link: &Link) {}
    fn visit_macro(&mut self, _macro: &Macro) {}
    fn visit_anchor(&mut self, _anchor: &Anchor) {}
    fn visit_attribute_reference(&mut self, _reference: &AttributeReference) {}
    fn visit_line_break(&mut self, _options: &Options) {}
    fn visit_page_break(&mut self, _options: &Options) {}
}

/// Walk the whole body of `document`.
pub fn walk(visitor: &mut dyn Visitor, document: &Document) {
    walk_elements(visitor, &document.body.children);
}

pub fn walk_elements(visitor: &mut dyn Visitor, elements: &[Element]) {
    for element in elements {
        walk_element(visitor, element);
    }
}

/// Walk one element and everything below it.
pub fn walk_element(visitor: &mut dyn Visitor, element: &Element) {
    match element {
        Element::Paragraph(paragraph) => {
            visitor.visit_paragraph(paragraph);
            walk_elements(visitor, &paragraph.children);
            visitor.leave_paragraph(paragraph);
        }
        Element::Section(section) => {
            visitor.visit_section(section);
            walk_element(visitor, &section.title);
            walk_elements(visitor, &section.children);
            visitor.leave_section(section);
        }
        Element::OrderedList(list) | Element::UnorderedList(list) => {
            let ordered = matches!(element, Element::OrderedList(_));
            visitor.visit_list(list, ordered);
            walk_elements(visitor, &list.children);
            visitor.leave_list(list, ordered);
        }
        Element::DescriptionList(list) => {
            visitor.visit_description_list(list);
            for (term, description) in &list.items {
                walk_element(visitor, term);
                walk_element(visitor, description);
            }
            visitor.leave_description_list(list);
        }
        Element::Table(table) => {
            visitor.visit_table(table);
            for row in &table.rows {
                walk_elements(visitor, row);
            }
            visitor.leave_table(table);
        }
        Element::Quote(quote) => {
            visitor.visit_quote(quote);
            walk_elements(visitor, &quote.children);
            visitor.leave_quote(quote);
        }
        Element::OpenBlock(block) => {
            visitor.visit_open_block(block);
            walk_elements(visitor, &block.children);
            visitor.leave_open_block(block);
        }
        Element::Admonition(admonition) => {
            visitor.visit_admonition(admonition);
            walk_element(visitor, &admonition.content);
            visitor.leave_admonition(admonition);
        }
        Element::ConditionalBlock(block) => {
            visitor.visit_conditional_block(block);
            walk_elements(visitor, &block.children);
            visitor.leave_conditional_block(block);
        }
        Element::Code(code) => {
            visitor.visit_code(code);
            for callout in &code.callouts {
                walk_element(visitor, &callout.explanation);
            }
        }
        Element::Text(text) => visitor.visit_text(text),
        Element::Listing(listing) => visitor.visit_listing(listing),
        Element::PassthroughBlock(passthrough) => visitor.visit_passthrough(passthrough),
        Element::Link(link) => visitor.visit_link(link),
        Element::Macro(m) => visitor.visit_macro(m),
        Element::Anchor(anchor) => visitor.visit_anchor(anchor),
        Element::AttributeReference(reference) => visitor.visit_attribute_reference(reference),
        Element::LineBreak(options) => visitor.visit_line_break(options),
        Element::PageBreak(options) => visitor.visit_page_break(options),
    }
}
