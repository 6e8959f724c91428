//! Whole document tests
//!
//! Parse complete documents through the public API and check the resulting tree, either
//! directly or through a visitor.

use adoc_parser::adoc::ast::{
    Admonition, AdmonitionLevel, Code, ConditionalBlock, Container, Element, Options, Section,
    Table, Visitor,
};
use adoc_parser::adoc::formats::to_treeviz_str;
use adoc_parser::adoc::resolver::LocalContentResolver;
use adoc_parser::adoc::{Parser, ParserError};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

#[derive(Default)]
struct Census {
    kinds: Vec<&'static str>,
    section_levels: Vec<usize>,
    languages: Vec<String>,
    admonitions: Vec<AdmonitionLevel>,
}

impl Visitor for Census {
    fn visit_section(&mut self, section: &Section) {
        self.kinds.push("section");
        self.section_levels.push(section.level);
    }
    fn visit_list(&mut self, _list: &Container, ordered: bool) {
        self.kinds.push(if ordered { "ordered" } else { "unordered" });
    }
    fn visit_table(&mut self, _table: &Table) {
        self.kinds.push("table");
    }
    fn visit_code(&mut self, code: &Code) {
        self.kinds.push("code");
        if let Some(language) = code.language() {
            self.languages.push(language.to_string());
        }
    }
    fn visit_admonition(&mut self, admonition: &Admonition) {
        self.kinds.push("admonition");
        self.admonitions.push(admonition.level);
    }
    fn visit_conditional_block(&mut self, _block: &ConditionalBlock) {
        self.kinds.push("conditional");
    }
    fn visit_page_break(&mut self, _options: &Options) {
        self.kinds.push("page-break");
    }
}

const GUIDE: &str = "\
= User Guide
Jane Doe <jane@example.org>
2.1, 2024-03-01: Spring release
:product: Widget
:lang: rust

== Getting started

Install {product} first.

. Download
. Unpack

[source,{lang}]
----
fn main() {}
----

== Reference

|===
|Name |Value
|size |3
|===

NOTE: Settings are read once.

ifdef::env-web[]
Online only.
endif::[]

<<<
";

#[test]
fn guide_header() {
    let doc = Parser::new().parse(GUIDE).unwrap();
    assert_eq!(doc.header.title, "User Guide");
    assert_eq!(doc.header.author.as_ref().map(|a| a.mail.as_str()), Some("jane@example.org"));
    assert_eq!(doc.header.revision.as_ref().map(|r| r.number.as_str()), Some("2.1"));
    assert_eq!(doc.header.attributes.get("product"), Some("Widget"));
}

#[test]
fn guide_blocks_in_document_order() {
    let doc = Parser::new().parse(GUIDE).unwrap();
    let mut census = Census::default();
    doc.accept(&mut census);
    assert_eq!(
        census.kinds,
        vec![
            "section",
            "ordered",
            "code",
            "section",
            "table",
            "admonition",
            "conditional",
            "page-break"
        ]
    );
    assert_eq!(census.section_levels, vec![2, 2]);
    assert_eq!(census.languages, vec!["rust"]);
    assert_eq!(census.admonitions, vec![AdmonitionLevel::Note]);
}

#[test]
fn header_attributes_reach_the_body() {
    let doc = Parser::new().parse(GUIDE).unwrap();
    let Element::Section(first) = &doc.body.children[0] else {
        panic!("expected a section, got {:?}", doc.body.children[0]);
    };
    assert_eq!(first.children[0], Element::text("Install Widget first."));
}

#[test]
fn conditional_blocks_are_resolved_by_the_consumer() {
    let doc = Parser::new().parse(GUIDE).unwrap();
    let Element::Section(reference) = &doc.body.children[1] else {
        panic!("expected a section");
    };
    let block = reference
        .children
        .iter()
        .find_map(|child| match child {
            Element::ConditionalBlock(block) => Some(block),
            _ => None,
        })
        .expect("conditional block");

    let web = HashMap::from([("env-web".to_string(), String::new())]);
    assert_eq!(
        block.active_children(&web).unwrap(),
        &[Element::text("Online only.")]
    );
    assert!(block.active_children(&HashMap::new()).unwrap().is_empty());
}

#[test]
fn treeviz_of_the_guide() {
    let doc = Parser::new().parse(GUIDE).unwrap();
    let tree = to_treeviz_str(&doc);
    assert!(tree.starts_with("⧉ User Guide\n├─ § level 2: Getting started\n"));
    assert!(tree.contains("ƒ fn main() {}"));
    assert!(tree.contains("▦ 2 rows"));
    assert!(tree.ends_with("└─ ⇟ page-break\n"));
}

#[test]
fn includes_from_disk() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("lib.rs"),
        "fn one() {}\nfn two() {}\nfn three() {}\n",
    )
    .unwrap();
    fs::write(dir.path().join("attrs.adoc"), ":name: included\n").unwrap();

    let parser = Parser::new().with_resolver(LocalContentResolver::new(dir.path()));
    let doc = parser
        .parse("= T\ninclude::attrs.adoc[]\n\n{name}\n\n----\ninclude::lib.rs[lines=2..3]\n----")
        .unwrap();
    assert_eq!(doc.header.attributes.get("name"), Some("included"));
    assert_eq!(doc.body.children[0], Element::text("included"));
    let Element::Code(code) = &doc.body.children[1] else {
        panic!("expected code, got {:?}", doc.body.children[1]);
    };
    assert!(code.value.starts_with("fn two() {}\nfn three() {}"));
    assert!(!code.value.contains("one"));
}

#[test]
fn tagged_regions_from_disk() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("t.rb"),
        "require 'x'\n# tag::a[]\nputs 'a'\n# end::a[]\nputs 'skipped'\n# tag::b[]\nputs 'b'\n# end::b[]\n",
    )
    .unwrap();

    let parser = Parser::new().with_resolver(LocalContentResolver::new(dir.path()));
    let doc = parser.parse("----\ninclude::t.rb[tags=a;b]\n----").unwrap();
    let Element::Code(code) = &doc.body.children[0] else {
        panic!("expected code, got {:?}", doc.body.children[0]);
    };
    assert!(code.value.starts_with("puts 'a'\nputs 'b'"));
    assert!(!code.value.contains("skipped"));
    assert!(!code.value.contains("require"));
    assert!(!code.value.contains("tag::"));
}

#[test]
fn missing_include_is_an_error() {
    let dir = TempDir::new().unwrap();
    let parser = Parser::new().with_resolver(LocalContentResolver::new(dir.path()));
    let error = parser.parse("include::absent.adoc[]").unwrap_err();
    assert_eq!(
        error.root_cause(),
        &ParserError::MissingInclude {
            target: "absent.adoc".into()
        }
    );
    assert!(parser.parse("include::absent.adoc[opts=optional]").is_ok());
}

#[test]
fn nesting_is_bounded() {
    let error = Parser::new()
        .with_max_depth(2)
        .parse("--\n____\n> deep\n____\n--")
        .unwrap_err();
    assert_eq!(error.root_cause(), &ParserError::NestingTooDeep { max: 2 });
}

#[test]
fn one_parser_many_threads() {
    let parser = Parser::new().with_attributes(Options::from([("who", "thread")]));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let parser = parser.clone();
            std::thread::spawn(move || parser.parse(&format!("{{who}} {i}")).unwrap())
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let doc = handle.join().unwrap();
        assert_eq!(doc.body.children, vec![Element::text(format!("thread {i}"))]);
    }
}
