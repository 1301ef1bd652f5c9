// SPDX-License-Identifier: MIT

//! RFC 3339 timestamp predicates
//!
//! Both sides are compared as UTC instants, so `2020-01-01T02:00:00+02:00`
//! equals `2020-01-01T00:00:00Z`. The constant is validated when the
//! expression is built; the parameter value is parsed at evaluation time.
//! [`time_contains`] is the exception: it matches the raw text.

use super::logic::or;
use super::time::DateFormat;
use crate::exp::ast::{Expression, Pattern, Predicate};
use crate::exp::error::CompileError;
use chrono::{DateTime, NaiveDateTime};

fn instant(value: &str) -> Result<NaiveDateTime, CompileError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_utc())
        .map_err(|e| CompileError::InvalidTimestamp {
            text: value.to_string(),
            reason: e.to_string(),
        })
}

pub fn time_eq(key: impl Into<String>, value: &str) -> Result<Expression, CompileError> {
    Ok(DateFormat::Rfc3339.on(key, instant(value)?))
}

pub fn time_gt(key: impl Into<String>, value: &str) -> Result<Expression, CompileError> {
    Ok(DateFormat::Rfc3339.after(key, instant(value)?))
}

/// Shorthand for `or([time_gt(key, v), time_eq(key, v)])`
pub fn time_gte(key: impl Into<String>, value: &str) -> Result<Expression, CompileError> {
    let key = key.into();
    Ok(or([time_gt(key.clone(), value)?, time_eq(key, value)?]))
}

pub fn time_lt(key: impl Into<String>, value: &str) -> Result<Expression, CompileError> {
    Ok(DateFormat::Rfc3339.before(key, instant(value)?))
}

/// Shorthand for `or([time_lt(key, v), time_eq(key, v)])`
pub fn time_lte(key: impl Into<String>, value: &str) -> Result<Expression, CompileError> {
    let key = key.into();
    Ok(or([time_lt(key.clone(), value)?, time_eq(key, value)?]))
}

/// Value matches `pattern`, a case-insensitive regular expression searched
/// anywhere in the raw text. A `+` stands for itself, so offsets such as
/// `+02:00` can be written unescaped.
///
/// ```
/// use exp_rs::exp::{catalog::time_contains, Map};
///
/// let m = Map::from([("at".to_string(), "2020-06-01T14:00:00+02:00".to_string())]);
/// assert!(time_contains("at", "2020-06-01t14").unwrap().eval(&m));
/// assert!(time_contains("at", "+02:00$").unwrap().eval(&m));
/// ```
pub fn time_contains(key: impl Into<String>, pattern: &str) -> Result<Expression, CompileError> {
    let pattern = Pattern::new(pattern.replace('+', "\\+")).map_err(|e| {
        CompileError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        }
    })?;
    Ok(Expression::compare(key, Predicate::Regex(pattern)))
}
