use ariadne::{self, Color, Label, Report, ReportKind, Source};
use std::io;
use std::ops::Range;
use thiserror::Error;

/// A run of input characters at which no lexical rule can start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unexpected input '{fragment}' ({column})")]
pub struct LexError {
    pub fragment: String,
    pub column: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Unbalanced parentheses ({column})")]
    UnbalancedBrackets { column: usize },

    #[error("Invalid expression structure")]
    InvalidStructure,

    #[error("Expected '{expected}', found '{found}' ({column})")]
    ParseMismatch {
        expected: String,
        found: String,
        column: usize,
    },
}

impl ExpressionError {
    /// The user-facing one-line summary of the error category.
    pub fn summary(&self) -> &'static str {
        match self {
            ExpressionError::UnbalancedBrackets { .. } => "Your expression doesn't have balanced parentheses",
            _ => "There's an error in your expression. Try again",
        }
    }

    /// Char range (0-based) the error points at. `InvalidStructure` is not localized and
    /// spans the whole source.
    pub fn span(&self, source: &str) -> Range<usize> {
        match self {
            ExpressionError::Lex(LexError { fragment, column }) => {
                let start = column.saturating_sub(1);
                start..start + fragment.chars().count()
            }
            ExpressionError::UnbalancedBrackets { column } => {
                let start = column.saturating_sub(1);
                start..start + 1
            }
            ExpressionError::InvalidStructure => 0..source.chars().count(),
            ExpressionError::ParseMismatch { found, column, .. } => {
                let start = column.saturating_sub(1);
                start..start + found.chars().count().max(1)
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            ExpressionError::Lex(LexError { fragment, .. }) => {
                format!("'{}' is not a number, variable, operator or parenthesis", fragment)
            }
            ExpressionError::UnbalancedBrackets { .. } => "This parenthesis has no partner".to_string(),
            ExpressionError::InvalidStructure => {
                "Expected factors and operators to alternate, starting and ending with a factor".to_string()
            }
            ExpressionError::ParseMismatch { expected, .. } => format!("Expected '{}'", expected),
        }
    }
}

/// Prints an annotated report of `error` for `source` to stderr.
pub fn report(source: &str, error: &ExpressionError) -> io::Result<()> {
    let source_name = "CLI";
    let span = error.span(source);

    Report::build(ReportKind::Error, (source_name, span.clone()))
        .with_message(error.summary())
        .with_label(
            Label::new((source_name, span))
                .with_message(error.label())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((source_name, Source::from(source)))
}
