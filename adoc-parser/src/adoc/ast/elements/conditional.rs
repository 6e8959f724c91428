//! Conditional blocks
//!
//!     `ifdef::name[]`, `ifndef::name[]` and `ifeval::[left op right]` regions keep their
//!     children and a [`Condition`]. The condition is data, not a closure: a renderer evaluates
//!     it against whatever attribute context it renders with, as many times as it needs.

use super::element::Element;
use crate::adoc::ast::options::Options;
use crate::adoc::attributes::{early_attribute_replacement, AttributeLookup, Layered};
use crate::adoc::error::{ParserError, ParserResult};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonOperator {
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
}

impl ComparisonOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "==",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::Less => "<",
            ComparisonOperator::LessOrEqual => "<=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterOrEqual => ">=",
        }
    }

    fn compare_numbers(&self, left: f64, right: f64) -> bool {
        match self {
            ComparisonOperator::Equal => left == right,
            ComparisonOperator::NotEqual => left != right,
            ComparisonOperator::Less => left < right,
            ComparisonOperator::LessOrEqual => left <= right,
            ComparisonOperator::Greater => left > right,
            ComparisonOperator::GreaterOrEqual => left >= right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Condition {
    Ifdef {
        attribute: String,
    },
    Ifndef {
        attribute: String,
    },
    Ifeval {
        left: String,
        operator: ComparisonOperator,
        right: String,
        /// Attributes known when the expression was parsed, consulted before the evaluation
        /// context.
        #[serde(skip)]
        snapshot: Options,
    },
}

impl Condition {
    pub fn evaluate(&self, context: &dyn AttributeLookup) -> ParserResult<bool> {
        match self {
            Condition::Ifdef { attribute } => Ok(context.attribute(attribute).is_some()),
            Condition::Ifndef { attribute } => Ok(context.attribute(attribute).is_none()),
            Condition::Ifeval {
                left,
                operator,
                right,
                snapshot,
            } => {
                let lookup = Layered::new(snapshot, context);
                let left = early_attribute_replacement(left, &lookup, true);
                let right = early_attribute_replacement(right, &lookup, true);
                match operator {
                    ComparisonOperator::Equal => Ok(left == right),
                    ComparisonOperator::NotEqual => Ok(left != right),
                    _ => Ok(operator.compare_numbers(number(&left)?, number(&right)?)),
                }
            }
        }
    }
}

fn number(value: &str) -> ParserResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| Box::new(ParserError::invalid_number(value, "ifeval operand")))
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Ifdef { attribute } => write!(f, "ifdef::{}", attribute),
            Condition::Ifndef { attribute } => write!(f, "ifndef::{}", attribute),
            Condition::Ifeval {
                left,
                operator,
                right,
                ..
            } => write!(f, "ifeval::[{} {} {}]", left, operator.symbol(), right),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalBlock {
    pub condition: Condition,
    pub children: Vec<Element>,
    pub options: Options,
}

impl ConditionalBlock {
    pub fn new(condition: Condition, children: Vec<Element>) -> Self {
        Self {
            condition,
            children,
            options: Options::new(),
        }
    }

    /// The children to render in `context`, empty when the condition does not hold.
    pub fn active_children(&self, context: &dyn AttributeLookup) -> ParserResult<&[Element]> {
        Ok(if self.condition.evaluate(context)? {
            &self.children
        } else {
            &[]
        })
    }
}
