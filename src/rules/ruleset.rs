// SPDX-License-Identifier: MIT

//! Compiled rule sets
//!
//! A [`RuleSet`] is built once from a [`RuleSetDefinition`] and is then
//! read-only, so it can be shared between threads and evaluated concurrently.

use super::types::RuleSetDefinition;
use crate::exp::compiler::parse_with;
use crate::exp::error::ExpError;
use crate::exp::{Expression, Params};
use std::collections::HashSet;

/// A named rule with its compiled condition
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub description: String,
    /// Expression source as written in the definition
    pub source: String,
    pub expression: Expression,
}

impl Rule {
    /// Whether the rule applies to `params`
    pub fn applies<P: Params + ?Sized>(&self, params: &P) -> bool {
        let result = self.expression.eval(params);
        log::trace!("rule '{}' ({}) -> {}", self.name, self.expression, result);
        result
    }
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    name: String,
    description: String,
    rules: Vec<Rule>,
    fallback: Option<String>,
}

impl RuleSet {
    /// Compile every rule, failing on the first one that does not compile
    pub fn compile(def: &RuleSetDefinition) -> Result<Self, ExpError> {
        Self::build(def, false)
    }

    /// Compile every rule, skipping the ones that do not compile
    pub fn compile_lenient(def: &RuleSetDefinition) -> Result<Self, ExpError> {
        Self::build(def, true)
    }

    fn build(def: &RuleSetDefinition, skip_broken: bool) -> Result<Self, ExpError> {
        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(def.rules.len());

        for rule in &def.rules {
            if !seen.insert(rule.name.as_str()) {
                return Err(ExpError::config(format!(
                    "duplicate rule '{}' in rule set '{}'",
                    rule.name, def.name
                )));
            }

            match parse_with(&rule.when, &def.options) {
                Ok(expression) => rules.push(Rule {
                    name: rule.name.clone(),
                    description: rule.description.clone(),
                    source: rule.when.clone(),
                    expression,
                }),
                Err(e) if skip_broken => {
                    log::warn!("Skipping rule '{}' in '{}': {}", rule.name, def.name, e);
                }
                Err(e) => return Err(ExpError::rule(&rule.name, e)),
            }
        }

        log::debug!(
            "compiled rule set '{}' with {} of {} rules",
            def.name,
            rules.len(),
            def.rules.len()
        );

        Ok(Self {
            name: def.name.clone(),
            description: def.description.clone(),
            rules,
            fallback: def.fallback.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// All rules that apply to `params`, in definition order
    pub fn matching<P: Params + ?Sized>(&self, params: &P) -> Vec<&Rule> {
        self.rules.iter().filter(|rule| rule.applies(params)).collect()
    }

    /// Name of the first rule that applies, or the fallback
    pub fn route<P: Params + ?Sized>(&self, params: &P) -> Option<&str> {
        let routed = self
            .rules
            .iter()
            .find(|rule| rule.applies(params))
            .map(|rule| rule.name.as_str())
            .or(self.fallback.as_deref());
        log::debug!("rule set '{}' routed to {:?}", self.name, routed);
        routed
    }
}
