//! `ifeval` expressions
//!
//! An expression is exactly `left operator right`. Operands are words or double quoted strings,
//! they may reference attributes (`{name}`), which are only resolved when the condition is
//! evaluated.
use crate::adoc::ast::{ComparisonOperator, Condition, Options};
use crate::adoc::error::{ParserError, ParserResult};
use logos::Logos;

/// Tokens of an `ifeval` expression
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t]+")]
pub enum Token {
    #[token("==")]
    Equal,
    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessOrEqual,
    #[token(">=")]
    GreaterOrEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,

    #[regex(r#""[^"]*""#)]
    Quoted,
    #[regex(r#"[^\s"<>=!]+"#)]
    Word,
}

impl Token {
    fn operator(&self) -> Option<ComparisonOperator> {
        Some(match self {
            Token::Equal => ComparisonOperator::Equal,
            Token::NotEqual => ComparisonOperator::NotEqual,
            Token::LessOrEqual => ComparisonOperator::LessOrEqual,
            Token::GreaterOrEqual => ComparisonOperator::GreaterOrEqual,
            Token::Less => ComparisonOperator::Less,
            Token::Greater => ComparisonOperator::Greater,
            Token::Quoted | Token::Word => return None,
        })
    }

    fn is_operand(&self) -> bool {
        matches!(self, Token::Quoted | Token::Word)
    }
}

/// Tokenize `expression`, a character no token accepts makes the whole expression invalid.
fn tokenize(expression: &str) -> ParserResult<Vec<(Token, &str)>> {
    let mut lexer = Token::lexer(expression);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        let token = token.map_err(|_| invalid(expression))?;
        tokens.push((token, lexer.slice()));
    }
    Ok(tokens)
}

fn invalid(expression: &str) -> Box<ParserError> {
    Box::new(ParserError::InvalidExpression {
        expression: expression.to_string(),
    })
}

fn operand(token: &Token, slice: &str) -> String {
    match token {
        Token::Quoted => slice[1..slice.len() - 1].to_string(),
        _ => slice.to_string(),
    }
}

/// Parse an `ifeval` expression into a condition carrying `snapshot`, the attributes known
/// at parse time.
pub fn parse_condition(expression: &str, snapshot: Options) -> ParserResult<Condition> {
    let tokens = tokenize(expression.trim())?;
    let [(left, left_slice), (operator, _), (right, right_slice)] = tokens.as_slice() else {
        return Err(invalid(expression));
    };
    let Some(comparison) = operator.operator() else {
        return Err(invalid(expression));
    };
    if !left.is_operand() || !right.is_operand() {
        return Err(invalid(expression));
    }
    Ok(Condition::Ifeval {
        left: operand(left, left_slice),
        operator: comparison,
        right: operand(right, right_slice),
        snapshot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(expression: &str) -> Vec<Token> {
        tokenize(expression)
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn operators_are_longest_match() {
        assert_eq!(
            kinds("{a} <= 2"),
            vec![Token::Word, Token::LessOrEqual, Token::Word]
        );
        assert_eq!(kinds("a<b"), vec![Token::Word, Token::Less, Token::Word]);
        assert_eq!(
            kinds(r#""x y" != z"#),
            vec![Token::Quoted, Token::NotEqual, Token::Word]
        );
    }

    #[rstest]
    #[case("{sectnumlevels} == 3", "{sectnumlevels}", ComparisonOperator::Equal, "3")]
    #[case(r#""{backend}" != "html5""#, "{backend}", ComparisonOperator::NotEqual, "html5")]
    #[case("{level}>=1", "{level}", ComparisonOperator::GreaterOrEqual, "1")]
    fn parses_operands_and_operator(
        #[case] expression: &str,
        #[case] left: &str,
        #[case] operator: ComparisonOperator,
        #[case] right: &str,
    ) {
        assert_eq!(
            parse_condition(expression, Options::new()).unwrap(),
            Condition::Ifeval {
                left: left.into(),
                operator,
                right: right.into(),
                snapshot: Options::new(),
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("{a}")]
    #[case("{a} ==")]
    #[case("{a} == 1 == 2")]
    #[case("== 1 2")]
    #[case("a ! b")]
    fn malformed_expressions(#[case] expression: &str) {
        let error = parse_condition(expression, Options::new()).unwrap_err();
        assert!(matches!(*error, ParserError::InvalidExpression { .. }));
    }
}
