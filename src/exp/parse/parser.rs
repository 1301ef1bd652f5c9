// SPDX-License-Identifier: MIT

//! Expression parser
//!
//! Builds a [`ParseTree`] from the token stream using an explicit stack of
//! groups instead of recursion. There is no operator precedence: a group is
//! folded strictly left to right, so anything but a single binary operation
//! per group needs explicit parentheses.
//!
//! `max_depth` bounds both the number of open groups and the nesting of the
//! expression the tree compiles to, so later recursive walks stay shallow.
//! Runs of the same logical operator compile to one n-ary node and do not
//! add depth.

use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use super::tree::ParseTree;
use crate::exp::error::{LexError, ParseError};
use crate::exp::options::ParseOptions;

/// An in-progress group: the tree built so far, a binary operator waiting
/// for its right operand and any `!` waiting for their operand.
#[derive(Debug, Default)]
struct Frame {
    tree: Option<ParseTree>,
    /// Nesting depth of `tree` once compiled
    depth: usize,
    pending: Option<Token>,
    negations: Vec<Token>,
}

impl Frame {
    fn expects_operand(&self) -> bool {
        self.tree.is_none() || self.pending.is_some()
    }

    fn is_incomplete(&self) -> bool {
        self.pending.is_some() || !self.negations.is_empty()
    }

    fn attach(
        &mut self,
        mut operand: ParseTree,
        depth: usize,
        at: &Token,
        limit: usize,
    ) -> Result<(), ParseError> {
        if !self.expects_operand() {
            return Err(unexpected(at));
        }

        let depth = depth + self.negations.len();
        let depth = match (&self.tree, &self.pending) {
            (Some(left), Some(op)) if op.kind.is_logical() && left.kind() == Some(op.kind) => {
                self.depth.max(depth + 1)
            }
            (Some(_), Some(_)) => self.depth.max(depth) + 1,
            _ => depth,
        };
        if depth > limit {
            return Err(too_deep(limit, at));
        }

        while let Some(not) = self.negations.pop() {
            operand = ParseTree::unary(not, operand);
        }
        self.tree = Some(match (self.tree.take(), self.pending.take()) {
            (Some(left), Some(op)) => ParseTree::binary(op, left, operand),
            _ => operand,
        });
        self.depth = depth;
        Ok(())
    }
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(input).lenient(options.lenient),
            max_depth: options.max_depth,
        }
    }

    /// Consume the token stream and return the parse tree. Empty input
    /// yields an empty tree.
    pub fn parse(mut self) -> Result<ParseTree, ParseError> {
        let mut root = Frame::default();
        let mut groups: Vec<Frame> = Vec::new();

        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::LeftParen => {
                    if !current(&mut root, &mut groups).expects_operand() {
                        return Err(unexpected(&token));
                    }
                    if groups.len() >= self.max_depth {
                        return Err(too_deep(self.max_depth, &token));
                    }
                    groups.push(Frame::default());
                }
                TokenKind::RightParen => {
                    let Some(group) = groups.pop() else {
                        return Err(ParseError::UnmatchedParen {
                            line: token.line,
                            col: token.col,
                        });
                    };
                    if group.is_incomplete() {
                        return Err(unexpected(&token));
                    }
                    let Some(tree) = group.tree else {
                        return Err(unexpected(&token));
                    };
                    current(&mut root, &mut groups).attach(
                        tree,
                        group.depth,
                        &token,
                        self.max_depth,
                    )?;
                }
                TokenKind::Not => {
                    let frame = current(&mut root, &mut groups);
                    if !frame.expects_operand() {
                        return Err(unexpected(&token));
                    }
                    if frame.negations.len() >= self.max_depth {
                        return Err(too_deep(self.max_depth, &token));
                    }
                    frame.negations.push(token);
                }
                kind if kind.is_binary() => {
                    let frame = current(&mut root, &mut groups);
                    if frame.expects_operand() || frame.is_incomplete() {
                        return Err(unexpected(&token));
                    }
                    frame.pending = Some(token);
                }
                kind if kind.is_operand() => {
                    let leaf = ParseTree::leaf(token.clone());
                    current(&mut root, &mut groups).attach(leaf, 0, &token, self.max_depth)?;
                }
                TokenKind::Eof => {
                    if !groups.is_empty() || root.is_incomplete() {
                        return Err(ParseError::UnexpectedEof {
                            line: token.line,
                            col: token.col,
                        });
                    }
                    return Ok(root.tree.unwrap_or_default());
                }
                TokenKind::Error => {
                    return Err(LexError {
                        message: token.value,
                        line: token.line,
                        col: token.col,
                    }
                    .into());
                }
                _ => return Err(unexpected(&token)),
            }
        }
    }
}

fn current<'s>(root: &'s mut Frame, groups: &'s mut [Frame]) -> &'s mut Frame {
    match groups.last_mut() {
        Some(frame) => frame,
        None => root,
    }
}

fn too_deep(limit: usize, token: &Token) -> ParseError {
    ParseError::TooDeep {
        limit,
        line: token.line,
        col: token.col,
    }
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        token: token.to_string(),
        line: token.line,
        col: token.col,
    }
}

/// Parse source text into a raw parse tree
pub fn parse_tree(input: &str, options: &ParseOptions) -> Result<ParseTree, ParseError> {
    let tree = Parser::new(input, options).parse()?;
    log::debug!("parsed {:?} into {}", input, tree);
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(input: &str) -> String {
        parse_tree(input, &ParseOptions::default())
            .unwrap()
            .to_string()
    }

    fn error(input: &str) -> ParseError {
        parse_tree(input, &ParseOptions::default()).unwrap_err()
    }

    #[test]
    fn test_parse_grouped_comparison() {
        assert_eq!(shape("(foo > bar)"), "[[foo] > [bar]]");
        assert_eq!(shape("(foo == 124)"), "[[foo] == [124]]");
    }

    #[test]
    fn test_parse_nested_groups() {
        assert_eq!(
            shape("((foo > bar) && true)"),
            "[[[foo] > [bar]] && [true]]"
        );
        assert_eq!(
            shape("((foo > 200) || (bar == \"x\"))"),
            "[[[foo] > [200]] || [[bar] == [x]]]"
        );
    }

    #[test]
    fn test_parse_without_outer_parens() {
        assert_eq!(shape("foo == 124"), "[[foo] == [124]]");
        assert_eq!(shape("true"), "[true]");
    }

    #[test]
    fn test_parse_keeps_token_positions() {
        let tree = parse_tree("(foo == 124)", &ParseOptions::default()).unwrap();
        let op = tree.token.as_ref().unwrap();
        assert_eq!(op.kind, TokenKind::Eq);
        assert_eq!((op.line, op.col), (1, 6));
        let right = tree.right.as_ref().unwrap().token.as_ref().unwrap();
        assert_eq!(right.kind, TokenKind::Number);
        assert_eq!(right.col, 9);
    }

    #[test]
    fn test_flat_chain_folds_left() {
        assert_eq!(
            shape("a == 1 && b == 2"),
            "[[[[a] == [1]] && [b]] == [2]]"
        );
        assert_eq!(
            shape("(a == 1) && (b == 2) || (c == 3)"),
            "[[[[a] == [1]] && [[b] == [2]]] || [[c] == [3]]]"
        );
    }

    #[test]
    fn test_parse_not() {
        assert_eq!(shape("!(a == 1)"), "[! [[a] == [1]]]");
        assert_eq!(shape("!!true"), "[! [! [true]]]");
        assert_eq!(
            shape("(a == 1) && !(b == 2)"),
            "[[[a] == [1]] && [! [[b] == [2]]]]"
        );
    }

    #[test]
    fn test_not_binds_to_next_operand_only() {
        assert_eq!(shape("!a == 1"), "[[! [a]] == [1]]");
    }

    #[test]
    fn test_empty_input_yields_empty_tree() {
        assert!(parse_tree("", &ParseOptions::default()).unwrap().is_empty());
        assert!(parse_tree("  \n ", &ParseOptions::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unterminated_string_surfaces_lex_error() {
        match error("(foo == 'bar") {
            ParseError::Lex(e) => {
                assert_eq!(e.message, "unterminated string literal");
                assert_eq!((e.line, e.col), (1, 13));
            }
            other => panic!("Expected lex error, got {:?}", other),
        }
    }

    #[test]
    fn test_unmatched_right_paren() {
        assert_eq!(error(")"), ParseError::UnmatchedParen { line: 1, col: 1 });
        assert_eq!(
            error("(a == 1))"),
            ParseError::UnmatchedParen { line: 1, col: 9 }
        );
    }

    #[test]
    fn test_unclosed_group() {
        assert_eq!(
            error("(a == 1"),
            ParseError::UnexpectedEof { line: 1, col: 8 }
        );
        assert_eq!(error("a =="), ParseError::UnexpectedEof { line: 1, col: 5 });
        assert_eq!(error("!"), ParseError::UnexpectedEof { line: 1, col: 2 });
    }

    #[test]
    fn test_unexpected_tokens() {
        assert_eq!(
            error("a b"),
            ParseError::UnexpectedToken {
                token: "identifier \"b\"".to_string(),
                line: 1,
                col: 3,
            }
        );
        assert!(matches!(error("== a"), ParseError::UnexpectedToken { col: 1, .. }));
        assert!(matches!(error("()"), ParseError::UnexpectedToken { col: 2, .. }));
        assert!(matches!(error("(a ==)"), ParseError::UnexpectedToken { col: 6, .. }));
        assert!(matches!(error("a (b)"), ParseError::UnexpectedToken { col: 3, .. }));
        assert!(matches!(error("a !b"), ParseError::UnexpectedToken { col: 3, .. }));
    }

    #[test]
    fn test_max_depth() {
        let options = ParseOptions::default().with_max_depth(3);
        assert!(parse_tree("(((a)))", &options).is_ok());
        assert_eq!(
            parse_tree("((((a))))", &options).unwrap_err(),
            ParseError::TooDeep {
                limit: 3,
                line: 1,
                col: 4
            }
        );
    }

    #[test]
    fn test_deep_nesting_within_default_limit() {
        let input = format!("{}true{}", "(".repeat(64), ")".repeat(64));
        assert_eq!(shape(&input), "[true]");
        let input = format!("{}true{}", "(".repeat(65), ")".repeat(65));
        assert!(matches!(error(&input), ParseError::TooDeep { .. }));
    }

    #[test]
    fn test_lenient_mode_stops_at_unknown_character() {
        let options = ParseOptions::default().with_lenient(true);
        let tree = parse_tree("(a == 1) # trailing", &options).unwrap();
        assert_eq!(tree.to_string(), "[[a] == [1]]");
        assert!(matches!(error("(a == 1) # trailing"), ParseError::Lex(_)));
    }

    #[test]
    fn test_long_negation_run_is_too_deep() {
        let input = format!("{}true", "!".repeat(30_000));
        assert_eq!(
            error(&input),
            ParseError::TooDeep {
                limit: 64,
                line: 1,
                col: 65
            }
        );
        let input = format!("{}true", "!".repeat(64));
        assert!(parse_tree(&input, &ParseOptions::default()).is_ok());
    }

    #[test]
    fn test_alternating_chain_is_too_deep() {
        let mut input = String::from("(x == 1)");
        for i in 0..20_000 {
            input.push_str(if i % 2 == 0 { " && (x == 1)" } else { " || (x == 1)" });
        }
        assert!(matches!(
            error(&input),
            ParseError::TooDeep { limit: 64, .. }
        ));

        let options = ParseOptions::default().with_max_depth(8);
        assert!(parse_tree("(a == 1) && (b == 2) || (c == 3)", &options).is_ok());
    }

    #[test]
    fn test_same_operator_chain_does_not_add_depth() {
        let input = vec!["(x == 1)"; 50_000].join(" || ");
        let tree = parse_tree(&input, &ParseOptions::default().with_max_depth(2)).unwrap();
        assert_eq!(tree.kind(), Some(TokenKind::Or));
    }

    #[test]
    fn test_negated_groups_count_towards_depth() {
        let options = ParseOptions::default().with_max_depth(3);
        assert!(parse_tree("!!(a == 1)", &options).is_ok());
        assert!(matches!(
            parse_tree("!!!(a == 1)", &options).unwrap_err(),
            ParseError::TooDeep { limit: 3, .. }
        ));
    }
}
