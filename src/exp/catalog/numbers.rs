// SPDX-License-Identifier: MIT

//! Numeric predicates
//!
//! Parameter values are parsed as `f64` at evaluation time. A value that
//! does not parse makes the predicate false.

use super::logic::{not, or};
use crate::exp::ast::{Expression, Literal, Predicate};

/// Value equals `v` numerically
pub fn eq(key: impl Into<String>, v: f64) -> Expression {
    Expression::compare(key, Predicate::Equal(Literal::Number(v)))
}

/// Shorthand for `not(eq(key, v))`
pub fn neq(key: impl Into<String>, v: f64) -> Expression {
    not(eq(key, v))
}

pub fn gt(key: impl Into<String>, v: f64) -> Expression {
    Expression::compare(key, Predicate::Greater(Literal::Number(v)))
}

/// Shorthand for `or([gt(key, v), eq(key, v)])`
pub fn gte(key: impl Into<String>, v: f64) -> Expression {
    let key = key.into();
    or([gt(key.clone(), v), eq(key, v)])
}

pub fn lt(key: impl Into<String>, v: f64) -> Expression {
    Expression::compare(key, Predicate::Less(Literal::Number(v)))
}

/// Shorthand for `or([lt(key, v), eq(key, v)])`
pub fn lte(key: impl Into<String>, v: f64) -> Expression {
    let key = key.into();
    or([lt(key.clone(), v), eq(key, v)])
}
