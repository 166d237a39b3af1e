//! Translates infix arithmetic expressions into postfix (Reverse Polish) notation.
//!
//! ```text
//! source → Scanner → tokens → brackets + validator → Parser → Expr → postorder
//! ```
//!
//! Expressions consist of numbers (`7`, `1.25`), lowercase variable names (`a`, `rate_x`),
//! the operators `+ - * /` and parentheses. Every stage either hands a well-formed result to
//! the next one or stops the pipeline with an [`ExpressionError`].

pub mod brackets;
pub mod error;
pub mod expr;
pub mod parser;
pub mod scanner;
pub mod token_type;
pub mod validator;

use tracing::{debug, instrument};

pub use error::{ExpressionError, LexError};
pub use expr::Expr;
pub use scanner::Token;

use parser::Parser;
use scanner::Scanner;

/// Scans `expression` into tokens without validating or parsing them.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, LexError> {
    Scanner::new(expression).scan()
}

/// Scans, validates and parses `expression` into a tree.
#[instrument(level = "debug")]
pub fn process_expression(expression: &str) -> Result<Expr, ExpressionError> {
    let tokens = tokenize(expression)?;

    if let Some(column) = brackets::unbalanced_column(expression) {
        debug!("Unbalanced parenthesis at column {}", column);
        return Err(ExpressionError::UnbalancedBrackets { column })
    }
    if !validator::is_well_formed(&tokens) {
        debug!("Rejected token structure");
        return Err(ExpressionError::InvalidStructure)
    }

    Parser::new(&tokens).parse().into_result()
}

/// Translates `expression` into its postfix lexemes.
pub fn evaluate_to_postfix(expression: &str) -> Result<Vec<String>, ExpressionError> {
    let expr = process_expression(expression)?;
    let postfix = expr.postfix();
    debug!("Postfix: {}", postfix.join(" "));
    Ok(postfix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_type::TokenType::{self, *};
    use proptest::prelude::*;

    fn postfix_string(expression: &str) -> Result<String, ExpressionError> {
        evaluate_to_postfix(expression).map(|postfix| postfix.join(" "))
    }

    #[test]
    fn test_tokenize() {
        let tokens: Vec<(TokenType, String)> = tokenize("7 + 3 * (10 / 12 / (3 + 3) -1 )")
            .unwrap()
            .into_iter()
            .map(|token| (token.variant, token.lexeme))
            .collect();

        let expected = vec![
            (Integer, "7"),
            (Operator, "+"),
            (Integer, "3"),
            (Operator, "*"),
            (OpenBracket, "("),
            (Integer, "10"),
            (Operator, "/"),
            (Integer, "12"),
            (Operator, "/"),
            (OpenBracket, "("),
            (Integer, "3"),
            (Operator, "+"),
            (Integer, "3"),
            (CloseBracket, ")"),
            (Operator, "-"),
            (Integer, "1"),
            (CloseBracket, ")"),
        ];
        let expected: Vec<(TokenType, String)> = expected
            .into_iter()
            .map(|(variant, lexeme)| (variant, lexeme.to_string()))
            .collect();

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_checks_on_unclosed_bracket() {
        let tokens = tokenize("((7 + 3)").unwrap();
        assert!(!brackets::is_balanced("((7 + 3)"));
        assert!(validator::is_well_formed(&tokens));
        assert!(brackets::is_balanced("7 + 3 * (10 / 12 / (3 + 3) -1 )"));
    }

    #[test]
    fn test_valid_input() {
        let cases = vec![
            ("7 + 3 * (10 / 12 / (3 + 3) -1 )", "7 3 10 12 / 3 3 + / 1 - * +"),
            ("7 + 3+5", "7 3 + 5 +"),
            ("(7 + 3)+5", "7 3 + 5 +"),
            ("6 /3 /2", "6 3 / 2 /"),
            ("(3+5)*2+(6-3)", "3 5 + 2 * 6 3 - +"),
            ("(3+5)*2+6-3", "3 5 + 2 * 6 + 3 -"),
            ("(1-2)/(0+5)", "1 2 - 0 5 + /"),
            ("a*x + b", "a x * b +"),
            ("1.25 - 10", "1.25 10 -"),
            ("  rate_x\t* (1.5 + y) ", "rate_x 1.5 y + *"),
        ];

        for (case, expected) in cases {
            let result = postfix_string(case);
            assert_eq!(result, Ok(expected.to_string()), "Wrong translation of {:?}", case);
        }
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(postfix_string("((7 + 3)"), Err(ExpressionError::UnbalancedBrackets { column: 1 }));
        assert_eq!(postfix_string("(7 + 3))"), Err(ExpressionError::UnbalancedBrackets { column: 8 }));
        assert_eq!(postfix_string("(7 + 3)+"), Err(ExpressionError::InvalidStructure));
        assert_eq!(postfix_string("7"), Err(ExpressionError::InvalidStructure));
        assert_eq!(postfix_string(""), Err(ExpressionError::InvalidStructure));
        assert_eq!(postfix_string("1 + ()"), Err(ExpressionError::InvalidStructure));
        assert_eq!(
            postfix_string("7 % 2"),
            Err(ExpressionError::Lex(LexError { fragment: "%".to_string(), column: 3 }))
        );
    }

    #[test]
    fn test_lex_error_comes_first() {
        // an unknown character wins over the unbalanced bracket
        assert!(matches!(postfix_string("((7 # 3)"), Err(ExpressionError::Lex(_))));
    }

    #[test]
    fn test_long_flat_chains() {
        let terms = 100_000;

        let sum = evaluate_to_postfix(&vec!["1"; terms].join("+")).unwrap();
        assert_eq!(sum.len(), 2 * terms - 1);
        assert_eq!(sum.iter().filter(|lexeme| *lexeme == "+").count(), terms - 1);
        assert_eq!(sum.last().map(String::as_str), Some("+"));

        let product = evaluate_to_postfix(&vec!["x"; terms].join(" * ")).unwrap();
        assert_eq!(product.len(), 2 * terms - 1);
        assert_eq!(&product[..3], ["x", "x", "*"]);
    }

    fn factor() -> impl Strategy<Value = String> {
        prop_oneof!["[0-9]{1,3}", "[0-9]\\.[0-9]{1,2}", "[a-z_]{1,4}"]
    }

    fn expression() -> impl Strategy<Value = String> {
        factor()
            .prop_recursive(4, 32, 2, |inner| {
                prop_oneof![
                    (inner.clone(), "[-+*/]", inner.clone())
                        .prop_map(|(left, operator, right)| format!("{} {} {}", left, operator, right)),
                    inner.prop_map(|expr| format!("({})", expr)),
                ]
            })
            .prop_filter("needs an operator", |expr| expr.contains(['+', '-', '*', '/']))
    }

    fn operator_from(class: &'static [&'static str]) -> impl Strategy<Value = &'static str> {
        proptest::sample::select(class.to_vec())
    }

    proptest! {
        #[test]
        fn test_postfix_length(source in expression()) {
            let tokens = tokenize(&source).unwrap();
            let no_brackets = tokens.iter().filter(|token| !token.variant.is_bracket()).count();
            let postfix = evaluate_to_postfix(&source).unwrap();
            prop_assert_eq!(postfix.len(), no_brackets);
        }

        #[test]
        fn test_checks_are_pure(source in "[0-9a-z()+*/ -]{0,16}") {
            prop_assert_eq!(brackets::is_balanced(&source), brackets::is_balanced(&source));
            if let Ok(tokens) = tokenize(&source) {
                prop_assert_eq!(validator::is_well_formed(&tokens), validator::is_well_formed(&tokens));
            }
        }

        #[test]
        fn test_same_precedence_is_left_associative(
            a in factor(), b in factor(), c in factor(),
            (op1, op2) in prop_oneof![
                (operator_from(&["+", "-"]), operator_from(&["+", "-"])),
                (operator_from(&["*", "/"]), operator_from(&["*", "/"])),
            ],
        ) {
            let source = format!("{} {} {} {} {}", a, op1, b, op2, c);
            let postfix = evaluate_to_postfix(&source).unwrap();
            prop_assert_eq!(postfix, vec![a, b, op1.to_string(), c, op2.to_string()]);
        }

        #[test]
        fn test_product_binds_tighter(
            a in factor(), b in factor(), c in factor(),
            low in operator_from(&["+", "-"]),
            high in operator_from(&["*", "/"]),
        ) {
            let product_last = evaluate_to_postfix(&format!("{} {} {} {} {}", a, low, b, high, c)).unwrap();
            prop_assert_eq!(
                product_last,
                vec![a.clone(), b.clone(), c.clone(), high.to_string(), low.to_string()]
            );

            let product_first = evaluate_to_postfix(&format!("{} {} {} {} {}", a, high, b, low, c)).unwrap();
            prop_assert_eq!(product_first, vec![a, b, high.to_string(), c, low.to_string()]);
        }
    }
}
