use serde::Serialize;
use std::fmt;

/// Why navigation to a domain was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DenyReason {
    /// Target was empty or not a parseable hostname
    #[serde(rename = "invalid domain")]
    InvalidDomain,

    /// Whitelist mode and no whitelist rule won for the target
    #[serde(rename = "domain not in whitelist")]
    NotInWhitelist,

    /// Blacklist mode and a blacklist rule won for the target
    #[serde(rename = "domain in blacklist")]
    InBlacklist,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::InvalidDomain => "invalid domain",
            DenyReason::NotInWhitelist => "domain not in whitelist",
            DenyReason::InBlacklist => "domain in blacklist",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a domain access evaluation.
///
/// `matched` carries the domain of the rule that decided the outcome, for
/// audit logging; it is absent when the default applied or the target was
/// invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    /// Whether navigation to the target is permitted
    pub allowed: bool,

    /// Denial reason, absent when allowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenyReason>,

    /// Domain of the deciding rule, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
}

impl AccessDecision {
    /// Allowed with no deciding rule (blacklist-mode default).
    pub fn allow() -> Self {
        AccessDecision {
            allowed: true,
            reason: None,
            matched: None,
        }
    }

    /// Allowed because the given rule won.
    pub fn allow_matched(rule_domain: impl Into<String>) -> Self {
        AccessDecision {
            allowed: true,
            reason: None,
            matched: Some(rule_domain.into()),
        }
    }

    /// Denied with no deciding rule.
    pub fn deny(reason: DenyReason) -> Self {
        AccessDecision {
            allowed: false,
            reason: Some(reason),
            matched: None,
        }
    }

    /// Denied because the given rule won.
    pub fn deny_matched(reason: DenyReason, rule_domain: impl Into<String>) -> Self {
        AccessDecision {
            allowed: false,
            reason: Some(reason),
            matched: Some(rule_domain.into()),
        }
    }
}
