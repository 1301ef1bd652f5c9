// SPDX-License-Identifier: MIT

//! YAML schema types for rule sets
//!
//! A rule set is a named, ordered list of rules, each guarded by a `when`
//! expression:
//!
//! ```yaml
//! name: routing
//! description: "Pick a landing page"
//! options:
//!   max_depth: 16
//! rules:
//!   - name: greek
//!     when: (country == 'GR')
//!   - name: adult
//!     when: (age >= 18)
//! fallback: default
//! ```

use crate::exp::options::ParseOptions;
use serde::{Deserialize, Serialize};

/// Top-level rule set definition
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RuleSetDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Parser options applied to every rule in the set
    #[serde(default)]
    pub options: ParseOptions,
    pub rules: Vec<RuleDefinition>,
    /// Returned by routing when no rule matches
    pub fallback: Option<String>,
}

/// A single named rule
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RuleDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Expression source deciding whether the rule applies
    pub when: String,
}
