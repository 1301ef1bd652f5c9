// SPDX-License-Identifier: MIT

//! Temporal predicates
//!
//! Every temporal predicate carries the [`DateFormat`] used to read the
//! parameter value, fixed when the expression is built. There is no shared
//! global format, so expressions built with different formats can be
//! evaluated side by side.

use crate::exp::ast::{CalendarField, DateLiteral, Expression, Literal, Predicate};
use chrono::{DateTime, Month, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// Format used when no other is given
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// How parameter values are turned into dates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// A strftime pattern; date-only patterns resolve to midnight
    Pattern(String),
    /// RFC 3339 timestamps, normalised to UTC
    Rfc3339,
}

impl DateFormat {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(pattern.into())
    }

    /// Parse a raw value, `None` if it does not match the format
    pub fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        match self {
            DateFormat::Pattern(pattern) => NaiveDateTime::parse_from_str(raw, pattern)
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(raw, pattern)
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                }),
            DateFormat::Rfc3339 => DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_utc()),
        }
    }

    /// Swap in a new format, returning the previous one
    pub fn replace(&mut self, format: DateFormat) -> DateFormat {
        std::mem::replace(self, format)
    }

    fn literal(&self, date: NaiveDateTime) -> Literal {
        Literal::Date(DateLiteral {
            value: date,
            format: self.clone(),
        })
    }

    fn calendar(&self, key: impl Into<String>, field: CalendarField) -> Expression {
        Expression::compare(
            key,
            Predicate::Calendar {
                field,
                format: self.clone(),
            },
        )
    }

    /// True if the value is the same instant as `date`
    pub fn on(&self, key: impl Into<String>, date: NaiveDateTime) -> Expression {
        Expression::compare(key, Predicate::Equal(self.literal(date)))
    }

    /// True if the value is strictly before `date`
    pub fn before(&self, key: impl Into<String>, date: NaiveDateTime) -> Expression {
        Expression::compare(key, Predicate::Less(self.literal(date)))
    }

    /// True if the value is strictly after `date`
    pub fn after(&self, key: impl Into<String>, date: NaiveDateTime) -> Expression {
        Expression::compare(key, Predicate::Greater(self.literal(date)))
    }

    pub fn weekday(&self, key: impl Into<String>, weekday: Weekday) -> Expression {
        self.calendar(key, CalendarField::Weekday(weekday))
    }

    /// Day of the month, 1-based
    pub fn day(&self, key: impl Into<String>, day: u32) -> Expression {
        self.calendar(key, CalendarField::Day(day))
    }

    pub fn month(&self, key: impl Into<String>, month: Month) -> Expression {
        self.calendar(key, CalendarField::Month(month))
    }

    pub fn year(&self, key: impl Into<String>, year: i32) -> Expression {
        self.calendar(key, CalendarField::Year(year))
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::Pattern(DEFAULT_DATE_FORMAT.to_string())
    }
}

/// [`DateFormat::on`] with the default format
pub fn on(key: impl Into<String>, date: NaiveDateTime) -> Expression {
    DateFormat::default().on(key, date)
}

/// [`DateFormat::before`] with the default format
pub fn before(key: impl Into<String>, date: NaiveDateTime) -> Expression {
    DateFormat::default().before(key, date)
}

/// [`DateFormat::after`] with the default format
pub fn after(key: impl Into<String>, date: NaiveDateTime) -> Expression {
    DateFormat::default().after(key, date)
}

pub fn weekday(key: impl Into<String>, weekday: Weekday) -> Expression {
    DateFormat::default().weekday(key, weekday)
}

pub fn day(key: impl Into<String>, day: u32) -> Expression {
    DateFormat::default().day(key, day)
}

pub fn month(key: impl Into<String>, month: Month) -> Expression {
    DateFormat::default().month(key, month)
}

pub fn year(key: impl Into<String>, year: i32) -> Expression {
    DateFormat::default().year(key, year)
}
