// SPDX-License-Identifier: MIT

//! Predicate catalog
//!
//! Constructors for building expressions directly, without parsing text.
//! All predicates take the parameter key first and the comparison value
//! second.

pub mod logic;
pub mod network;
pub mod numbers;
pub mod strings;
pub mod time;
pub mod timestamp;

pub use logic::{and, constant, not, or, FALSE, TRUE};
pub use network::contains_ip;
pub use numbers::{eq, gt, gte, lt, lte, neq};
pub use strings::{contains, contains_any, contains_char, count, equal_fold, len, match_any, matches};
pub use time::{after, before, day, month, on, weekday, year, DateFormat};
pub use timestamp::{time_contains, time_eq, time_gt, time_gte, time_lt, time_lte};
