// SPDX-License-Identifier: MIT

//! Tokens produced by the lexer

use std::fmt;

/// Classification of a lexical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Operands
    Identifier,
    Number,
    String,
    Boolean,

    // Logical operators
    And,
    Or,
    Not,

    // Comparison operators
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,

    // Delimiters
    LeftParen,
    RightParen,

    // Special
    Eof,
    Error,
}

impl TokenKind {
    /// Map an operator lexeme to its kind
    pub fn operator_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "!" => Some(TokenKind::Not),
            "&&" => Some(TokenKind::And),
            "||" => Some(TokenKind::Or),
            "==" => Some(TokenKind::Eq),
            "!=" => Some(TokenKind::NotEq),
            ">" => Some(TokenKind::Gt),
            ">=" => Some(TokenKind::Gte),
            "<" => Some(TokenKind::Lt),
            "<=" => Some(TokenKind::Lte),
            _ => None,
        }
    }

    /// Identifier, number, string or boolean
    pub fn is_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::Number | TokenKind::String | TokenKind::Boolean
        )
    }

    /// Number, string or boolean
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::String | TokenKind::Boolean
        )
    }

    /// `&&` or `||`
    pub fn is_logical(&self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Or)
    }

    /// Binary operators, logical and comparison
    pub fn is_binary(&self) -> bool {
        self.is_logical() || self.is_comparison()
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::Gt
                | TokenKind::Gte
                | TokenKind::Lt
                | TokenKind::Lte
        )
    }

    /// `>`, `>=`, `<`, `<=`
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            TokenKind::Gt | TokenKind::Gte | TokenKind::Lt | TokenKind::Lte
        )
    }

    /// The operator seen from the other side: `5 < x` is `x > 5`
    pub fn mirrored(&self) -> TokenKind {
        match self {
            TokenKind::Gt => TokenKind::Lt,
            TokenKind::Gte => TokenKind::Lte,
            TokenKind::Lt => TokenKind::Gt,
            TokenKind::Lte => TokenKind::Gte,
            other => *other,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Boolean => "boolean",
            TokenKind::And => "'&&'",
            TokenKind::Or => "'||'",
            TokenKind::Not => "'!'",
            TokenKind::Eq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Gt => "'>'",
            TokenKind::Gte => "'>='",
            TokenKind::Lt => "'<'",
            TokenKind::Lte => "'<='",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Eof => "end of input",
            TokenKind::Error => "error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexical unit with its source position (1-based).
///
/// For [`TokenKind::Error`] the value holds the error message and the
/// position is where scanning failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            line,
            col,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_operand() {
            write!(f, "{} {:?}", self.kind, self.value)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_from_str() {
        assert_eq!(TokenKind::operator_from_str("&&"), Some(TokenKind::And));
        assert_eq!(TokenKind::operator_from_str(">="), Some(TokenKind::Gte));
        assert_eq!(TokenKind::operator_from_str("!"), Some(TokenKind::Not));
        assert_eq!(TokenKind::operator_from_str("="), None);
        assert_eq!(TokenKind::operator_from_str("&&!"), None);
    }

    #[test]
    fn test_classification() {
        assert!(TokenKind::Identifier.is_operand());
        assert!(!TokenKind::Identifier.is_literal());
        assert!(TokenKind::Boolean.is_literal());
        assert!(TokenKind::And.is_binary());
        assert!(TokenKind::Or.is_logical());
        assert!(!TokenKind::Eq.is_logical());
        assert!(!TokenKind::Not.is_binary());
        assert!(TokenKind::Lte.is_ordering());
        assert!(!TokenKind::NotEq.is_ordering());
    }

    #[test]
    fn test_mirrored() {
        assert_eq!(TokenKind::Lt.mirrored(), TokenKind::Gt);
        assert_eq!(TokenKind::Gte.mirrored(), TokenKind::Lte);
        assert_eq!(TokenKind::Eq.mirrored(), TokenKind::Eq);
    }

    #[test]
    fn test_token_display() {
        let t = Token::new(TokenKind::Identifier, "foo", 1, 2);
        assert_eq!(t.to_string(), "identifier \"foo\"");
        let t = Token::new(TokenKind::RightParen, ")", 1, 5);
        assert_eq!(t.to_string(), "')'");
    }
}
