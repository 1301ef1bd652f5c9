// SPDX-License-Identifier: MIT

//! Named rule sets
//!
//! Rule sets group expressions under names and answer two questions for a
//! set of parameters: which rules match, and which single rule a request
//! should be routed to.

pub mod loader;
pub mod ruleset;
pub mod types;

pub use loader::RuleLoader;
pub use ruleset::{Rule, RuleSet};
pub use types::{RuleDefinition, RuleSetDefinition};
