// SPDX-License-Identifier: MIT

//! Expression evaluator
//!
//! A pure recursive walk: no state, no side effects, no failure. Predicates
//! that cannot coerce their operand evaluate to false.

use super::ast::{CalendarField, Expression, Literal, Predicate};
use super::params::Params;
use chrono::{Datelike, NaiveDateTime};
use std::cmp::Ordering;
use std::net::IpAddr;

/// Evaluate an expression against a parameter source
pub fn evaluate<P: Params + ?Sized>(expr: &Expression, params: &P) -> bool {
    match expr {
        Expression::Constant(value) => *value,
        Expression::And(items) => items.iter().all(|item| evaluate(item, params)),
        Expression::Or(items) => items.iter().any(|item| evaluate(item, params)),
        Expression::Not(inner) => !evaluate(inner, params),
        Expression::Compare { key, predicate } => {
            let raw = params.get(key);
            let result = predicate.test(&raw);
            log::trace!("{:?}={:?} against {:?} -> {}", key, raw, predicate, result);
            result
        }
    }
}

impl Expression {
    /// Shorthand for [`evaluate`]
    pub fn eval<P: Params + ?Sized>(&self, params: &P) -> bool {
        evaluate(self, params)
    }
}

impl Predicate {
    /// Test a raw parameter value
    pub fn test(&self, raw: &str) -> bool {
        match self {
            Predicate::Equal(literal) => equals(raw, literal),
            Predicate::Greater(literal) => ordering(raw, literal) == Some(Ordering::Greater),
            Predicate::Less(literal) => ordering(raw, literal) == Some(Ordering::Less),
            Predicate::Contains(substr) => raw.contains(substr.as_str()),
            // IPv4-mapped IPv6 values are tested as their IPv4 address
            Predicate::InNet(net) => raw
                .parse::<IpAddr>()
                .map(|ip| net.contains(&ip.to_canonical()))
                .unwrap_or(false),
            Predicate::Regex(pattern) => pattern.is_match(raw),
            Predicate::ContainsAny(chars) => raw.chars().any(|c| chars.contains(c)),
            Predicate::ContainsChar(c) => raw.contains(*c),
            Predicate::EqualFold(s) => raw.to_lowercase() == s.to_lowercase(),
            Predicate::Len(length) => raw.chars().count() == *length,
            Predicate::Count { separator, count } => {
                raw.matches(separator.as_str()).count() == *count
            }
            Predicate::Calendar { field, format } => format
                .parse(raw)
                .map(|date| calendar_matches(field, &date))
                .unwrap_or(false),
        }
    }
}

fn equals(raw: &str, literal: &Literal) -> bool {
    match literal {
        Literal::Number(n) => raw.parse::<f64>().map(|v| v == *n).unwrap_or(false),
        Literal::String(s) => raw == s,
        Literal::Date(date) => date.format.parse(raw) == Some(date.value),
    }
}

/// Order of the raw value relative to the literal; `None` when either side
/// has no ordering (strings, unparsable values, NaN)
fn ordering(raw: &str, literal: &Literal) -> Option<Ordering> {
    match literal {
        Literal::Number(n) => raw.parse::<f64>().ok()?.partial_cmp(n),
        Literal::Date(date) => Some(date.format.parse(raw)?.cmp(&date.value)),
        Literal::String(_) => None,
    }
}

fn calendar_matches(field: &CalendarField, date: &NaiveDateTime) -> bool {
    match field {
        CalendarField::Weekday(weekday) => date.weekday() == *weekday,
        CalendarField::Day(day) => date.day() == *day,
        CalendarField::Month(month) => date.month() == month.number_from_month(),
        CalendarField::Year(year) => date.year() == *year,
    }
}
