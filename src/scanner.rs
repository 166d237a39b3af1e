use std::fmt;

use tracing::trace;

use crate::error::LexError;
use crate::token_type::TokenType::{self, *};

/// The `Scanner` loops through the source expression, identifying tokens and returning them as
/// Vec<Token>.
///
/// Lexical rules are tried in a fixed order at every position, each one matching greedily:
///
/// 1. float: one digit, '.', one or more digits
/// 2. integer: one or more digits
/// 3. variable: one or more of 'a'..='z' and '_'
/// 4. '(' and ')'
/// 5. operator: one of '+', '-', '*', '/'
/// 6. whitespace, which is skipped
///
/// Floats come before integers because an integer is a prefix of a float.
pub struct Scanner<'a> {
    source: &'a str,
    chars: Vec<char>,
    tokens: Vec<Token>, // stores scanned tokens
    start: usize, // index of first char of lexeme
    current: usize, // index of current char
}

impl<'a> Scanner<'a> {

    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            chars: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
        }
    }

    /// Scans the whole source. Stops at the first region no rule matches.
    pub fn scan(mut self) -> Result<Vec<Token>, LexError> {
        while !self.at_end() {
            self.start = self.current;
            self.scan_token()?;
        }
        trace!("Scanned {} tokens from {:?}", self.tokens.len(), self.source);
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<(), LexError> {
        let c = match self.advance() {
            Some(ch) => ch,
            None => return Ok(()),
        };

        match c {
            '0'..='9' => self.number(),
            _ if Self::is_variable_char(c) => self.variable(),
            '(' => self.add_token(OpenBracket),
            ')' => self.add_token(CloseBracket),
            '+' | '-' | '*' | '/' => self.add_token(Operator),
            _ if c.is_whitespace() => {
                while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                    self.advance();
                }
                Ok(())
            }
            _ => self.unexpected(),
        }
    }

    fn number(&mut self) -> Result<(), LexError> {
        // Float: exactly one digit before the '.'
        if let (Some('.'), Some(c_next)) = (self.peek(), self.peek_next()) {
            if c_next.is_ascii_digit() {
                self.advance(); // consume the '.'
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.advance();
                }
                return self.add_token(Float);
            }
        }

        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        self.add_token(Integer)
    }

    fn variable(&mut self) -> Result<(), LexError> {
        while matches!(self.peek(), Some(c) if Self::is_variable_char(c)) {
            self.advance();
        }
        self.add_token(Variable)
    }

    /// Collects the run of characters no rule can start at and reports it.
    fn unexpected(&mut self) -> Result<(), LexError> {
        while matches!(self.peek(), Some(c) if !Self::starts_token(c)) {
            self.advance();
        }
        Err(LexError {
            fragment: self.lexeme(),
            column: self.start + 1,
        })
    }

    fn is_variable_char(c: char) -> bool {
        c.is_ascii_lowercase() || c == '_'
    }

    fn starts_token(c: char) -> bool {
        c.is_ascii_digit()
            || Self::is_variable_char(c)
            || matches!(c, '(' | ')' | '+' | '-' | '*' | '/')
            || c.is_whitespace()
    }

    fn at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    /// Return current char and advance to next.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.current += 1;
        }
        c
    }

    /// Return current char without advancing.
    fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    /// Return next char without advancing.
    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).copied()
    }

    fn lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    fn add_token(&mut self, token_type: TokenType) -> Result<(), LexError> {
        let token = Token {
            variant: token_type,
            lexeme: self.lexeme(),
            column: self.start + 1,
        };
        self.tokens.push(token);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub variant: TokenType,
    pub lexeme: String,
    pub column: usize, // 1-based, in chars
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.variant, self.lexeme)
    }
}
