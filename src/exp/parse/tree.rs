// SPDX-License-Identifier: MIT

//! Raw binary parse tree
//!
//! Leaves carry an operand token and no children. Binary operators carry
//! both children; `!` carries only its right child. A tree without a token
//! is empty and only ever appears as the root of an empty input.

use super::token::{Token, TokenKind};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseTree {
    pub token: Option<Token>,
    pub left: Option<Box<ParseTree>>,
    pub right: Option<Box<ParseTree>>,
}

impl ParseTree {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn leaf(token: Token) -> Self {
        Self {
            token: Some(token),
            left: None,
            right: None,
        }
    }

    pub fn binary(op: Token, left: ParseTree, right: ParseTree) -> Self {
        Self {
            token: Some(op),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn unary(op: Token, operand: ParseTree) -> Self {
        Self {
            token: Some(op),
            left: None,
            right: Some(Box::new(operand)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn kind(&self) -> Option<TokenKind> {
        self.token.as_ref().map(|t| t.kind)
    }
}

/// Children are released with an explicit stack so long left-folded chains
/// do not recurse.
impl Drop for ParseTree {
    fn drop(&mut self) {
        let mut stack: Vec<Box<ParseTree>> = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

enum Piece<'t> {
    Node(&'t ParseTree),
    Text(&'t str),
}

/// Renders the tree as nested brackets, e.g. `[[foo] == [124]]`
impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Piece::Node(self)];
        while let Some(piece) = stack.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node) => node,
            };
            let Some(token) = &node.token else {
                f.write_str("[]")?;
                continue;
            };

            f.write_str("[")?;
            stack.push(Piece::Text("]"));
            if let Some(right) = &node.right {
                stack.push(Piece::Node(right));
                stack.push(Piece::Text(" "));
            }
            stack.push(Piece::Text(&token.value));
            if let Some(left) = &node.left {
                stack.push(Piece::Text(" "));
                stack.push(Piece::Node(left));
            }
        }
        Ok(())
    }
}
