// SPDX-License-Identifier: MIT

//! Compiled expression tree
//!
//! An [`Expression`] is immutable once built and independent of the parser.
//! It can be shared across threads and evaluated any number of times.

use super::catalog::time::DateFormat;
use chrono::{Month, NaiveDateTime, Weekday};
use ipnet::IpNet;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// A compiled, evaluable expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Fixed result
    Constant(bool),
    /// True iff every child is true; empty is true
    And(Vec<Expression>),
    /// True iff any child is true; empty is false
    Or(Vec<Expression>),
    /// Negation of the child
    Not(Box<Expression>),
    /// Leaf: test the raw parameter value under `key`
    Compare { key: String, predicate: Predicate },
}

/// Test applied to the raw string value of a parameter.
///
/// Coercion failures (non-numeric value, unparsable date, invalid IP) make
/// the predicate false; they never abort evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Numbers compare numerically, strings verbatim, dates as instants
    Equal(Literal),
    /// Numbers and dates only
    Greater(Literal),
    /// Numbers and dates only
    Less(Literal),
    /// Value contains the substring
    Contains(String),
    /// Value is an IP address inside the prefix
    InNet(IpNet),
    /// Value matches the pattern
    Regex(Pattern),
    /// Value contains any of these characters
    ContainsAny(String),
    ContainsChar(char),
    /// Equal under Unicode case folding
    EqualFold(String),
    /// Length in characters
    Len(usize),
    /// Number of non-overlapping occurrences of `separator`
    Count { separator: String, count: usize },
    /// A component of a date parsed with `format`
    Calendar {
        field: CalendarField,
        format: DateFormat,
    },
}

/// Date component tested by [`Predicate::Calendar`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarField {
    Weekday(Weekday),
    Day(u32),
    Month(Month),
    Year(i32),
}

/// Typed comparison value, fixed at construction time
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
    Date(DateLiteral),
}

/// A case-insensitive regular expression, compared by its source text
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = RegexBuilder::new(&source).case_insensitive(true).build()?;
        Ok(Self { source, regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, raw: &str) -> bool {
        self.regex.is_match(raw)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// A date constant together with the format used to read parameter values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLiteral {
    pub value: NaiveDateTime,
    pub format: DateFormat,
}

impl Expression {
    /// Leaf testing the parameter under `key`
    pub fn compare(key: impl Into<String>, predicate: Predicate) -> Self {
        Expression::Compare {
            key: key.into(),
            predicate,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(value) => write!(f, "{}", value),
            Expression::And(items) => write_joined(f, items, " ∧ "),
            Expression::Or(items) => write_joined(f, items, " ∨ "),
            Expression::Not(inner) => write!(f, "¬{}", inner),
            Expression::Compare { key, predicate } => match predicate {
                Predicate::Equal(lit) => write!(f, "[{}=={}]", key, lit),
                Predicate::Greater(lit) => write!(f, "[{}>{}]", key, lit),
                Predicate::Less(lit) => write!(f, "[{}<{}]", key, lit),
                Predicate::Contains(s) => write!(f, "[{}∋{:?}]", key, s),
                Predicate::InNet(net) => write!(f, "[{}∈{}]", key, net),
                Predicate::Regex(p) => write!(f, "[{}~{:?}]", key, p.as_str()),
                Predicate::ContainsAny(chars) => write!(f, "[{}∋any{:?}]", key, chars),
                Predicate::ContainsChar(c) => write!(f, "[{}∋{:?}]", key, c),
                Predicate::EqualFold(s) => write!(f, "[{}≈{:?}]", key, s),
                Predicate::Len(n) => write!(f, "[len({})=={}]", key, n),
                Predicate::Count { separator, count } => {
                    write!(f, "[count({},{:?})=={}]", key, separator, count)
                }
                Predicate::Calendar { field, .. } => match field {
                    CalendarField::Weekday(w) => write!(f, "[weekday({})=={}]", key, w),
                    CalendarField::Day(d) => write!(f, "[day({})=={}]", key, d),
                    CalendarField::Month(m) => write!(f, "[month({})=={}]", key, m.name()),
                    CalendarField::Year(y) => write!(f, "[year({})=={}]", key, y),
                },
            },
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expression], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, ")")
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "{:?}", s),
            Literal::Date(d) => write!(f, "{}", d.value),
        }
    }
}
