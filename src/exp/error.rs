// SPDX-License-Identifier: MIT

//! Typed error handling for exp-rs
//!
//! Each stage of the pipeline has its own error type. They all carry the
//! source position of the offending input where one exists, and are fatal to
//! the single parse/compile call that produced them. Evaluation never fails.

use thiserror::Error;

/// Scanner failure: unterminated quote, unknown character or operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{col} lexical error: {message}")]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub col: usize,
}

/// Errors raised while building the parse tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer emitted an error token
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A `)` without a matching `(`
    #[error("{line}:{col} syntax error: unmatched ')'")]
    UnmatchedParen { line: usize, col: usize },

    /// A token that cannot appear at this point of the expression
    #[error("{line}:{col} syntax error: unexpected {token}")]
    UnexpectedToken {
        token: String,
        line: usize,
        col: usize,
    },

    /// Input ended inside a group or before an operand
    #[error("{line}:{col} syntax error: unexpected end of input")]
    UnexpectedEof { line: usize, col: usize },

    /// Parenthesis nesting exceeded the configured limit
    #[error("{line}:{col} syntax error: nesting deeper than {limit} levels")]
    TooDeep {
        limit: usize,
        line: usize,
        col: usize,
    },
}

/// Errors raised while turning a parse tree (or builder input) into an
/// [`Expression`](crate::exp::Expression)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Nothing to compile
    #[error("empty expression")]
    Empty,

    /// An operand sits where a boolean expression is required
    #[error("{line}:{col} expected a boolean expression, found {found}")]
    NotBoolean {
        found: String,
        line: usize,
        col: usize,
    },

    /// A comparison needs exactly one identifier and one literal
    #[error("{line}:{col} ambiguous operands for '{op}': {reason}")]
    AmbiguousOperands {
        op: String,
        reason: String,
        line: usize,
        col: usize,
    },

    /// Ordering operators are only defined over numbers
    #[error("{line}:{col} '{op}' requires a numeric operand, found {value:?}")]
    NotNumeric {
        op: String,
        value: String,
        line: usize,
        col: usize,
    },

    /// A numeric literal that is not `digit+ ('.' digit+)?`
    #[error("{line}:{col} malformed number {text:?}")]
    InvalidNumber {
        text: String,
        line: usize,
        col: usize,
    },

    /// A timestamp constant that is not RFC 3339
    #[error("invalid timestamp {text:?}: {reason}")]
    InvalidTimestamp { text: String, reason: String },

    /// A pattern the regex engine rejects
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl ParseError {
    /// Line and column of the failure
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::Lex(e) => (e.line, e.col),
            ParseError::UnmatchedParen { line, col }
            | ParseError::UnexpectedToken { line, col, .. }
            | ParseError::UnexpectedEof { line, col }
            | ParseError::TooDeep { line, col, .. } => (*line, *col),
        }
    }
}

impl CompileError {
    /// Line and column of the failure, when it came from source text
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            CompileError::NotBoolean { line, col, .. }
            | CompileError::AmbiguousOperands { line, col, .. }
            | CompileError::NotNumeric { line, col, .. }
            | CompileError::InvalidNumber { line, col, .. } => Some((*line, *col)),
            CompileError::Empty
            | CompileError::InvalidTimestamp { .. }
            | CompileError::InvalidPattern { .. } => None,
        }
    }
}

/// Top-level error type for exp-rs
#[derive(Debug, Error)]
pub enum ExpError {
    /// Syntax errors, including lexical ones
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Semantic errors in an otherwise well-formed tree
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    /// A named rule failed to compile
    #[error("rule '{name}': {source}")]
    Rule {
        name: String,
        #[source]
        source: Box<ExpError>,
    },

    /// Configuration errors (bad rule set, bad CLI input)
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl From<LexError> for ExpError {
    fn from(err: LexError) -> Self {
        Self::Parse(ParseError::Lex(err))
    }
}

impl ExpError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Wrap an error with the name of the rule it belongs to
    pub fn rule(name: impl Into<String>, source: ExpError) -> Self {
        Self::Rule {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Line and column of the offending input, if the error has one
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            ExpError::Parse(e) => Some(e.position()),
            ExpError::Compile(e) => e.position(),
            ExpError::Rule { source, .. } => source.position(),
            _ => None,
        }
    }
}
