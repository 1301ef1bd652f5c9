// SPDX-License-Identifier: MIT

//! Parser configuration

use serde::{Deserialize, Serialize};

/// Default limit on parenthesis nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options threaded through lexing and parsing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Maximum number of nested groups before the parser gives up
    pub max_depth: usize,
    /// Historical lexer behaviour: an unknown character ends the input and an
    /// unknown operator is skipped instead of being reported
    pub lenient: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            lenient: false,
        }
    }
}
