//! A recursive descent parser for infix arithmetic expressions.
//!
//! Grammar:
//!
//! sum_expr -> product_expr ( ( "+" | "-" ) product_expr )*
//! product_expr -> factor ( ( "*" | "/" ) factor )*
//! factor -> FLOAT | INTEGER | VARIABLE | "(" sum_expr ")"
//!
//! Examples: "7 + 3 * (10 / 12)", "a*x + b", "1.25 - 10"
//!
//! The parser expects a stream that already passed the bracket and structure checks. It does
//! not stop at a mismatch: the sticky `had_error` flag is raised and the tree it keeps building
//! must not be trusted.

use tracing::{debug, trace};

use crate::error::ExpressionError;
use crate::expr::Expr;
use crate::scanner::Token;
use crate::token_type::{Operator, TokenType::{self, *}};

pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    had_error: bool,
    mismatch: Option<ExpressionError>, // first mismatch only
}

/// The tree together with the error flag. `expr` is `None` only for an empty stream.
#[derive(Debug)]
pub struct ParseResult {
    pub expr: Option<Expr>,
    pub had_error: bool,
    pub mismatch: Option<ExpressionError>,
}

impl ParseResult {
    /// The tree, unless the error flag was raised.
    pub fn into_result(self) -> Result<Expr, ExpressionError> {
        match (self.had_error, self.expr) {
            (false, Some(expr)) => Ok(expr),
            _ => Err(self.mismatch.unwrap_or(ExpressionError::InvalidStructure)),
        }
    }
}

impl<'a> Parser<'a> {

    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            current: 0,
            had_error: false,
            mismatch: None,
        }
    }

    /// Parses the whole stream starting at `sum_expr`. Tokens left over afterwards raise the
    /// error flag.
    pub fn parse(mut self) -> ParseResult {
        if self.tokens.is_empty() {
            self.error("expression");
            return self.finish(None)
        }

        let expr = self.sum_expr();
        if !self.at_end() {
            self.error("operator");
        }
        self.finish(Some(expr))
    }

    fn finish(self, expr: Option<Expr>) -> ParseResult {
        ParseResult {
            expr,
            had_error: self.had_error,
            mismatch: self.mismatch,
        }
    }

    /// Matches production: sum_expr -> product_expr ( ( "+" | "-" ) product_expr )*
    fn sum_expr(&mut self) -> Expr {
        let mut left = self.product_expr();
        while let Some(operator) = self.match_operator(&Operator::SUM) {
            let right = self.product_expr();
            left = Expr::binary(left, operator, right);
        }
        left
    }

    /// Matches production: product_expr -> factor ( ( "*" | "/" ) factor )*
    fn product_expr(&mut self) -> Expr {
        let mut left = self.factor();
        while let Some(operator) = self.match_operator(&Operator::PRODUCT) {
            let right = self.factor();
            left = Expr::binary(left, operator, right);
        }
        left
    }

    /// Matches production: factor -> FLOAT | INTEGER | VARIABLE | "(" sum_expr ")"
    fn factor(&mut self) -> Expr {
        let tokens = self.tokens;
        match tokens.get(self.current) {
            Some(token) if token.variant.is_factor() => {
                self.advance(&token.lexeme);
                Expr::leaf(token.lexeme.as_str())
            }
            Some(token) if token.variant == OpenBracket => {
                self.advance("(");
                let expr = self.sum_expr();
                self.advance(")");
                expr
            }
            // Not consumed. Operators are picked up by the enclosing loops, anything else is
            // left over at the end.
            other => {
                self.error("number, variable or '('");
                Expr::leaf(other.map(|token| token.lexeme.as_str()).unwrap_or_default())
            }
        }
    }

    /// Consumes the current token if it is one of `operators`.
    fn match_operator(&mut self, operators: &[Operator]) -> Option<Operator> {
        let operator = self.peek_operator().filter(|operator| operators.contains(operator))?;
        self.advance(operator.as_ref());
        Some(operator)
    }

    fn peek_operator(&self) -> Option<Operator> {
        let token = self.tokens.get(self.current)?;
        if token.variant != TokenType::Operator {
            return None
        }
        Operator::parse_lexeme(&token.lexeme).ok()
    }

    /// Moves past the current token if its lexeme is `expected`. At the end of the stream this
    /// does nothing; on a different lexeme it raises the error flag and stays put.
    fn advance(&mut self, expected: &str) {
        if self.at_end() {
            return
        }
        if self.tokens[self.current].lexeme == expected {
            trace!("Consumed '{}' at {}", expected, self.current);
            self.current += 1;
        } else {
            self.error(expected);
        }
    }

    fn at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Raises the error flag and records the first mismatch.
    fn error(&mut self, expected: &str) {
        self.had_error = true;
        if self.mismatch.is_some() {
            return
        }

        let (found, column) = match self.tokens.get(self.current) {
            Some(token) => (token.lexeme.clone(), token.column),
            None => ("end of input".to_string(), self.end_column()),
        };
        debug!("Parse mismatch: expected '{}', found '{}' ({})", expected, found, column);
        self.mismatch = Some(ExpressionError::ParseMismatch {
            expected: expected.to_string(),
            found,
            column,
        });
    }

    /// Column just after the last token.
    fn end_column(&self) -> usize {
        self.tokens
            .last()
            .map(|token| token.column + token.lexeme.chars().count())
            .unwrap_or(1)
    }
}
