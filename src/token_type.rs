use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TokenType {
    Float, Integer, Variable, // factors
    OpenBracket, CloseBracket, // ()
    Operator, // + - * /
}

impl TokenType {
    /// Factors are the leaves of an expression: numbers and variable names.
    pub fn is_factor(self) -> bool {
        matches!(self, TokenType::Float | TokenType::Integer | TokenType::Variable)
    }

    pub fn is_bracket(self) -> bool {
        matches!(self, TokenType::OpenBracket | TokenType::CloseBracket)
    }
}

/// The four binary operators. `+ -` bind weaker than `* /`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString, strum_macros::AsRefStr)]
pub enum Operator {
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "*")]
    Star,
    #[strum(serialize = "/")]
    Slash,
}

impl Operator {
    pub const SUM: [Operator; 2] = [Operator::Plus, Operator::Minus];
    pub const PRODUCT: [Operator; 2] = [Operator::Star, Operator::Slash];

    pub fn parse_lexeme(lexeme: &str) -> Result<Operator, strum::ParseError> {
        Operator::from_str(lexeme)
    }
}
