// SPDX-License-Identifier: MIT

//! String predicates
//!
//! These work on the raw parameter value and cannot fail.

use super::logic::or;
use crate::exp::ast::{Expression, Literal, Predicate};

/// Value is exactly `value`
///
/// ```
/// use exp_rs::exp::{catalog::strings::matches, Map};
///
/// let m = Map::from([("foo".to_string(), "bar".to_string())]);
/// assert!(matches("foo", "bar").eval(&m));
/// assert!(!matches("foo", "baz").eval(&m));
/// ```
pub fn matches(key: impl Into<String>, value: impl Into<String>) -> Expression {
    Expression::compare(key, Predicate::Equal(Literal::String(value.into())))
}

/// Value is exactly one of `values`; shorthand for an `or` of [`matches`]
pub fn match_any<I, S>(key: impl Into<String>, values: I) -> Expression
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let key = key.into();
    or(values.into_iter().map(|v| matches(key.clone(), v)))
}

/// Value contains `substr`
pub fn contains(key: impl Into<String>, substr: impl Into<String>) -> Expression {
    Expression::compare(key, Predicate::Contains(substr.into()))
}

/// Value contains any of the characters in `chars`
pub fn contains_any(key: impl Into<String>, chars: impl Into<String>) -> Expression {
    Expression::compare(key, Predicate::ContainsAny(chars.into()))
}

pub fn contains_char(key: impl Into<String>, c: char) -> Expression {
    Expression::compare(key, Predicate::ContainsChar(c))
}

/// Value is `length` characters long
pub fn len(key: impl Into<String>, length: usize) -> Expression {
    Expression::compare(key, Predicate::Len(length))
}

/// Value contains exactly `count` non-overlapping occurrences of `separator`
pub fn count(key: impl Into<String>, separator: impl Into<String>, count: usize) -> Expression {
    Expression::compare(
        key,
        Predicate::Count {
            separator: separator.into(),
            count,
        },
    )
}

/// Value equals `value` ignoring case
pub fn equal_fold(key: impl Into<String>, value: impl Into<String>) -> Expression {
    Expression::compare(key, Predicate::EqualFold(value.into()))
}
