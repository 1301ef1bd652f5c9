// SPDX-License-Identifier: MIT

//! Rule set loader - YAML file loading and parsing

use super::types::RuleSetDefinition;
use crate::exp::error::ExpError;
use std::fs;
use std::path::Path;

/// Loads rule set definitions from YAML
pub struct RuleLoader;

impl RuleLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a rule set definition from a YAML file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<RuleSetDefinition, ExpError> {
        let path = path.as_ref();
        log::debug!("loading rule set from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse a rule set definition from a YAML string
    pub fn parse_yaml(content: &str) -> Result<RuleSetDefinition, ExpError> {
        let def: RuleSetDefinition = serde_yaml::from_str(content)?;
        Ok(def)
    }
}

impl Default for RuleLoader {
    fn default() -> Self {
        Self::new()
    }
}
