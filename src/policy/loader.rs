use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::domain::{DomainRule, SecurityMode};

use super::validate::{normalize_domain, validate_rule_domain, RuleSyntaxError};

/// Errors that can occur while loading a rules file.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid rule: {0}")]
    Rule(#[from] RuleSyntaxError),

    #[error("validation error: {0}")]
    Validation(String),
}

/// A consistent snapshot of the access policy: security mode plus the rule
/// list, as of `loaded_at`. This is what callers hand to the evaluator.
#[derive(Debug, Clone)]
pub struct RuleSnapshot {
    pub version: String,
    pub mode: SecurityMode,
    pub rules: Vec<DomainRule>,
    pub loaded_at: DateTime<Utc>,
}

impl RuleSnapshot {
    /// Empty snapshot used before the first successful load. Default-allow
    /// mode, consistent with the gate's fail-open stance.
    pub fn empty() -> Self {
        RuleSnapshot {
            version: "0.0.0".to_string(),
            mode: SecurityMode::default(),
            rules: Vec::new(),
            loaded_at: Utc::now(),
        }
    }
}

/// On-disk rules file shape.
#[derive(Debug, Deserialize)]
struct RulesFile {
    version: String,
    mode: SecurityMode,
    #[serde(default)]
    rules: Vec<DomainRule>,
}

/// Load and validate a rules file from YAML.
///
/// Every rule domain is normalized (trim + lowercase) and must pass rule
/// syntax validation; a single invalid rule fails the whole load so a bad
/// edit never half-applies.
pub fn load_rules(path: impl AsRef<Path>) -> Result<RuleSnapshot, RulesError> {
    let content = fs::read_to_string(path)?;
    let file: RulesFile = serde_yaml::from_str(&content)?;

    if file.version.is_empty() {
        return Err(RulesError::Validation(
            "rules version cannot be empty".to_string(),
        ));
    }

    let mut rules = Vec::with_capacity(file.rules.len());
    for mut rule in file.rules {
        rule.domain = normalize_domain(&rule.domain);
        validate_rule_domain(&rule.domain)?;
        rules.push(rule);
    }

    Ok(RuleSnapshot {
        version: file.version,
        mode: file.mode,
        rules,
        loaded_at: Utc::now(),
    })
}

/// Rules loader bound to a file path.
pub struct RulesLoader {
    rules_path: String,
}

impl RulesLoader {
    pub fn new(rules_path: impl Into<String>) -> Self {
        RulesLoader {
            rules_path: rules_path.into(),
        }
    }

    /// Load the rules file into a snapshot.
    pub fn load(&self) -> Result<RuleSnapshot, RulesError> {
        load_rules(&self.rules_path)
    }

    /// Get the rules file path.
    pub fn rules_path(&self) -> &str {
        &self.rules_path
    }
}
