//! Severity policies: which rules report, and how loudly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::RuleDescriptor;
use crate::enums::Severity;
use crate::error::ConfigError;

/// Maps a rule descriptor to the severity its problems are reported at.
/// [`Severity::Ignore`] suppresses the rule.
pub trait SeverityPolicy: Send + Sync {
    fn severity(&self, rule: &RuleDescriptor) -> Severity;
}

impl<F> SeverityPolicy for F
where
    F: Fn(&RuleDescriptor) -> Severity + Send + Sync,
{
    fn severity(&self, rule: &RuleDescriptor) -> Severity {
        self(rule)
    }
}

/// Mandated rules report at `medium`; best-practice rules are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSeverityPolicy;

impl SeverityPolicy for DefaultSeverityPolicy {
    fn severity(&self, rule: &RuleDescriptor) -> Severity {
        if rule.spec_mandated {
            Severity::Medium
        } else {
            Severity::Ignore
        }
    }
}

/// A policy loaded from configuration.
///
/// ```yaml
/// mandated: high
/// optional: low
/// rules:
///   OP-002: medium
///   INF-005: ignore
/// ```
///
/// Overrides may name codes the catalog does not contain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeverityConfig {
    pub mandated: Severity,
    pub optional: Severity,
    pub rules: HashMap<String, Severity>,
}

impl Default for SeverityConfig {
    fn default() -> Self {
        SeverityConfig {
            mandated: Severity::Medium,
            optional: Severity::Ignore,
            rules: HashMap::new(),
        }
    }
}

impl SeverityConfig {
    /// Loads a configuration from YAML (JSON is accepted too).
    pub fn from_yaml(input: &str) -> Result<Self, ConfigError> {
        serde_saphyr::from_str(input).map_err(|e| ConfigError::Syntax(e.to_string()))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::Shape(e.to_string()))
    }

    /// Sets the severity for one rule code.
    pub fn with_rule(mut self, code: impl Into<String>, severity: Severity) -> Self {
        self.rules.insert(code.into(), severity);
        self
    }
}

impl SeverityPolicy for SeverityConfig {
    fn severity(&self, rule: &RuleDescriptor) -> Severity {
        if let Some(severity) = self.rules.get(rule.code) {
            return *severity;
        }
        if rule.spec_mandated {
            self.mandated
        } else {
            self.optional
        }
    }
}
