// SPDX-License-Identifier: MIT

//! Tokenizer and parser for the expression language

mod lexer;
mod parser;
mod token;
mod tree;

pub use lexer::Lexer;
pub use parser::{parse_tree, Parser};
pub use token::{Token, TokenKind};
pub use tree::ParseTree;
