// SPDX-License-Identifier: MIT

//! Expression lexer
//!
//! A pull-based scanner driven by a small state machine. Each call to
//! [`Lexer::next_token`] runs states until one of them produces a token.
//! The stream always finishes with a single `Eof` or `Error` token.

use super::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    Identifier,
    Number,
    Operator,
    SingleQuote,
    DoubleQuote,
    End,
    Done,
}

type Step = (State, Option<Token>);

pub struct Lexer<'a> {
    input: &'a str,
    /// Current byte offset
    pos: usize,
    /// Byte offset where the pending token starts
    start: usize,
    /// 1-based line and column of `pos`
    here: (usize, usize),
    /// 1-based line and column of `start`
    origin: (usize, usize),
    state: State,
    lenient: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            here: (1, 1),
            origin: (1, 1),
            state: State::Init,
            lenient: false,
        }
    }

    /// In lenient mode an unknown character silently ends the stream and an
    /// unknown operator run is dropped, instead of producing an error token.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Get the next token from the input. Once the stream has finished this
    /// keeps returning `Eof`.
    pub fn next_token(&mut self) -> Token {
        loop {
            let (next, token) = match self.state {
                State::Init => self.lex_init(),
                State::Identifier => self.lex_identifier(),
                State::Number => self.lex_number(),
                State::Operator => self.lex_operator(),
                State::SingleQuote => self.lex_quoted('\''),
                State::DoubleQuote => self.lex_quoted('"'),
                State::End => (State::Done, Some(self.emit(TokenKind::Eof))),
                State::Done => return Token::new(TokenKind::Eof, "", self.here.0, self.here.1),
            };
            self.state = next;
            if let Some(token) = token {
                return token;
            }
        }
    }

    fn lex_init(&mut self) -> Step {
        while matches!(self.peek(), Some(c) if is_whitespace(c)) {
            self.advance();
        }
        self.ignore();

        match self.peek() {
            None => (State::End, None),
            Some(c) if c.is_ascii_digit() => (State::Number, None),
            Some(c) if is_identifier_start(c) => (State::Identifier, None),
            Some(c) if is_operator(c) => (State::Operator, None),
            Some('\'') => (State::SingleQuote, None),
            Some('"') => (State::DoubleQuote, None),
            Some('(') => {
                self.advance();
                (State::Init, Some(self.emit(TokenKind::LeftParen)))
            }
            Some(')') => {
                self.advance();
                (State::Init, Some(self.emit(TokenKind::RightParen)))
            }
            Some(c) if self.lenient => {
                log::debug!("lenient lexer stopping at unexpected character {:?}", c);
                (State::End, None)
            }
            Some(c) => {
                let err = self.error(format!("unexpected character {c:?}"), self.here);
                (State::Done, Some(err))
            }
        }
    }

    fn lex_identifier(&mut self) -> Step {
        while matches!(self.peek(), Some(c) if is_identifier_part(c)) {
            self.advance();
        }

        let kind = match self.buffer() {
            "true" | "false" => TokenKind::Boolean,
            _ => TokenKind::Identifier,
        };
        (State::Init, Some(self.emit(kind)))
    }

    /// Digits and dots. Whether the run is a well-formed number is decided
    /// by the compiler, which can then cite the offending text.
    fn lex_number(&mut self) -> Step {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.advance();
        }
        (State::Init, Some(self.emit(TokenKind::Number)))
    }

    fn lex_operator(&mut self) -> Step {
        while matches!(self.peek(), Some(c) if is_operator(c)) {
            self.advance();
        }

        let run = self.buffer();
        if let Some(kind) = TokenKind::operator_from_str(run) {
            return (State::Init, Some(self.emit(kind)));
        }

        if self.lenient {
            log::debug!("lenient lexer dropping unknown operator {:?}", run);
            self.ignore();
            return (State::Init, None);
        }

        // Operator characters are ASCII, so byte slicing is safe here.
        for len in [2, 1] {
            if run.len() > len {
                if let Some(kind) = TokenKind::operator_from_str(&run[..len]) {
                    self.pos = self.start + len;
                    self.here = (self.origin.0, self.origin.1 + len);
                    return (State::Init, Some(self.emit(kind)));
                }
            }
        }

        let err = self.error(format!("unknown operator {run:?}"), self.origin);
        (State::Done, Some(err))
    }

    fn lex_quoted(&mut self, quote: char) -> Step {
        let open = self.here;
        self.advance();
        let body = self.pos;

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    let value = &self.input[body..self.pos - c.len_utf8()];
                    let token = Token::new(TokenKind::String, value, open.0, open.1);
                    self.ignore();
                    return (State::Init, Some(token));
                }
                Some(_) => {}
                None => {
                    let err = self.error("unterminated string literal", self.here);
                    return (State::Done, Some(err));
                }
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        self.here = match c {
            '\n' => (self.here.0 + 1, 1),
            _ => (self.here.0, self.here.1 + 1),
        };
        Some(c)
    }

    fn buffer(&self) -> &'a str {
        &self.input[self.start..self.pos]
    }

    fn ignore(&mut self) {
        self.start = self.pos;
        self.origin = self.here;
    }

    fn emit(&mut self, kind: TokenKind) -> Token {
        let (line, col) = self.origin;
        let token = Token::new(kind, self.buffer(), line, col);
        self.ignore();
        token
    }

    fn error(&self, message: impl Into<String>, (line, col): (usize, usize)) -> Token {
        Token::new(TokenKind::Error, message, line, col)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.state == State::Done {
            None
        } else {
            Some(self.next_token())
        }
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_part(c: char) -> bool {
    c == '_' || c == '.' || c.is_alphanumeric()
}

fn is_operator(c: char) -> bool {
    matches!(c, '=' | '!' | '>' | '<' | '&' | '|')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_comparison() {
        let tokens: Vec<Token> = Lexer::new("(foo == 124)").collect();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::LeftParen, "(", 1, 1),
                Token::new(TokenKind::Identifier, "foo", 1, 2),
                Token::new(TokenKind::Eq, "==", 1, 6),
                Token::new(TokenKind::Number, "124", 1, 9),
                Token::new(TokenKind::RightParen, ")", 1, 12),
                Token::new(TokenKind::Eof, "", 1, 13),
            ]
        );
    }

    #[test]
    fn test_all_operators() {
        assert_eq!(
            kinds("! && || == != > >= < <="),
            vec![
                TokenKind::Not,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::Gt,
                TokenKind::Gte,
                TokenKind::Lt,
                TokenKind::Lte,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_boolean_literals() {
        let tokens: Vec<Token> = Lexer::new("true false truthy").collect();
        assert_eq!(tokens[0].kind, TokenKind::Boolean);
        assert_eq!(tokens[1].kind, TokenKind::Boolean);
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].value, "truthy");
    }

    #[test]
    fn test_identifier_with_dots_and_digits() {
        let tokens: Vec<Token> = Lexer::new("_user.address2.zip").collect();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].value, "_user.address2.zip");
    }

    #[test]
    fn test_numbers() {
        let tokens: Vec<Token> = Lexer::new("3.14 42").collect();
        assert_eq!(tokens[0].value, "3.14");
        assert_eq!(tokens[1].value, "42");
        assert_eq!(tokens[1].kind, TokenKind::Number);
    }

    #[test]
    fn test_malformed_number_is_left_to_compiler() {
        let tokens: Vec<Token> = Lexer::new("1.2.3").collect();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].value, "1.2.3");
    }

    #[test]
    fn test_quoted_strings() {
        let tokens: Vec<Token> = Lexer::new(r#"'single' "double" 'it"s'"#).collect();
        assert_eq!(tokens[0], Token::new(TokenKind::String, "single", 1, 1));
        assert_eq!(tokens[1], Token::new(TokenKind::String, "double", 1, 10));
        assert_eq!(tokens[2].value, "it\"s");
    }

    #[test]
    fn test_quoted_string_is_verbatim() {
        let tokens: Vec<Token> = Lexer::new(r#""a && (b) \n""#).collect();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].value, r"a && (b) \n");
    }

    #[test]
    fn test_unterminated_string() {
        let tokens: Vec<Token> = Lexer::new("(foo == 'bar").collect();
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Error);
        assert_eq!(last.value, "unterminated string literal");
        assert_eq!((last.line, last.col), (1, 13));
    }

    #[test]
    fn test_multiline_positions() {
        let tokens: Vec<Token> = Lexer::new("a ==\n  'x").collect();
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].col), (1, 3));
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Error);
        assert_eq!((last.line, last.col), (2, 5));
    }

    #[test]
    fn test_whitespace_is_skipped() {
        assert_eq!(
            kinds(" \t\r\n a \n"),
            vec![TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_unknown_character_is_an_error() {
        let tokens: Vec<Token> = Lexer::new("a == 1 # comment").collect();
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Error);
        assert_eq!(last.value, "unexpected character '#'");
        assert_eq!((last.line, last.col), (1, 8));
    }

    #[test]
    fn test_unknown_character_ends_stream_when_lenient() {
        let kinds: Vec<TokenKind> = Lexer::new("a == 1 # comment")
            .lenient(true)
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Eq,
                TokenKind::Number,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_unknown_operator_is_an_error() {
        let tokens: Vec<Token> = Lexer::new("a = 1").collect();
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Error);
        assert_eq!(last.value, "unknown operator \"=\"");
        assert_eq!((last.line, last.col), (1, 3));
    }

    #[test]
    fn test_unknown_operator_dropped_when_lenient() {
        let kinds: Vec<TokenKind> = Lexer::new("a = 1").lenient(true).map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Identifier, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn test_adjacent_operators_split() {
        assert_eq!(
            kinds("(a)&&!(b)"),
            vec![
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::RightParen,
                TokenKind::And,
                TokenKind::Not,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::RightParen,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("!!a"),
            vec![
                TokenKind::Not,
                TokenKind::Not,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_unicode_columns() {
        let tokens: Vec<Token> = Lexer::new("'ä' == ö").collect();
        assert_eq!(tokens[0].value, "ä");
        assert_eq!((tokens[1].line, tokens[1].col), (1, 5));
        assert_eq!(tokens[2].value, "ö");
        assert_eq!(tokens[2].col, 8);
    }

    #[test]
    fn test_eof_repeats_after_end() {
        let mut lexer = Lexer::new("a");
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_positions_on_long_input() {
        let mut input = "!true && ".repeat(100_000);
        input.push_str("\n\n   (x >= 1)");
        let tokens: Vec<Token> = Lexer::new(&input).collect();
        assert_eq!(tokens.len(), 300_000 + 6);

        let last_and = &tokens[299_999];
        assert_eq!(last_and.kind, TokenKind::And);
        assert_eq!((last_and.line, last_and.col), (1, 899_998));

        let paren = &tokens[300_000];
        assert_eq!(paren.kind, TokenKind::LeftParen);
        assert_eq!((paren.line, paren.col), (3, 4));
        let gte = &tokens[300_002];
        assert_eq!((gte.kind, gte.line, gte.col), (TokenKind::Gte, 3, 7));
        let eof = tokens.last().unwrap();
        assert_eq!((eof.kind, eof.line, eof.col), (TokenKind::Eof, 3, 12));
    }
}
