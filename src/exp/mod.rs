// SPDX-License-Identifier: MIT

//! Boolean expression language
//!
//! Source text such as `((foo > 200) || (bar == "x"))` is tokenized, parsed
//! into a [`ParseTree`](parse::ParseTree) and compiled into an
//! [`Expression`] that can be evaluated against any [`Params`] source.
//! Expressions can also be built directly from the [`catalog`].

pub mod ast;
pub mod catalog;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod options;
pub mod params;
pub mod parse;

pub use ast::{CalendarField, DateLiteral, Expression, Literal, Pattern, Predicate};
pub use catalog::DateFormat;
pub use compiler::{compile, parse, parse_with};
pub use error::{CompileError, ExpError, LexError, ParseError};
pub use evaluator::evaluate;
pub use options::ParseOptions;
pub use params::{Map, Params, QueryParams};
