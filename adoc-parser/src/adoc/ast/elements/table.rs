//! Tables

use super::element::Element;
use crate::adoc::ast::options::Options;
use serde::Serialize;

/// Rows of cells, each cell being one element
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    pub rows: Vec<Vec<Element>>,
    pub options: Options,
}

impl Table {
    pub fn new(rows: Vec<Vec<Element>>, options: Options) -> Self {
        Self { rows, options }
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}
