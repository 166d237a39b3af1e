//! Structural check of a token stream before parsing.
//!
//! A stream passes if its factors and operators alternate, it starts and ends with a factor
//! (ignoring brackets), it holds more than a lone factor, and no pair of parentheses is empty.
//! Bracket balance is checked separately in [`crate::brackets`].

use crate::scanner::Token;
use crate::token_type::TokenType::{self, *};

pub fn is_well_formed(tokens: &[Token]) -> bool {
    let no_brackets: Vec<TokenType> = tokens
        .iter()
        .map(|t| t.variant)
        .filter(|variant| !variant.is_bracket())
        .collect();

    let (first, last) = match (no_brackets.first(), no_brackets.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return false,
    };

    if !first.is_factor() || !last.is_factor() || no_brackets.len() < 2 {
        return false
    }

    let starts_well = tokens.first().is_some_and(|t| may_start(t.variant));
    let ends_well = tokens.last().is_some_and(|t| may_end(t.variant));

    starts_well
        && ends_well
        && tokens.windows(2).all(|pair| may_follow(pair[0].variant, pair[1].variant))
}

fn may_start(variant: TokenType) -> bool {
    variant.is_factor() || variant == OpenBracket
}

fn may_end(variant: TokenType) -> bool {
    variant.is_factor() || variant == CloseBracket
}

/// Whether `next` may directly follow `previous`.
fn may_follow(previous: TokenType, next: TokenType) -> bool {
    match previous {
        Float | Integer | Variable | CloseBracket => matches!(next, Operator | CloseBracket),
        // '(' followed by ')' would be an empty grouping
        Operator | OpenBracket => may_start(next),
    }
}
