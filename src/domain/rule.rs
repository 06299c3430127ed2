use serde::{Deserialize, Serialize};
use std::fmt;

/// Which list a domain rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Whitelist,
    Blacklist,
}

impl RuleKind {
    /// Parse from string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "whitelist" => Some(RuleKind::Whitelist),
            "blacklist" => Some(RuleKind::Blacklist),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Whitelist => "whitelist",
            RuleKind::Blacklist => "blacklist",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// System-wide security policy mode.
///
/// Whitelist is default-deny: a domain must be matched by a whitelist rule
/// to be reachable. Blacklist is default-allow: a domain is reachable unless
/// a blacklist rule matches it.
///
/// The mode is always passed explicitly into the evaluator rather than read
/// from process-wide state, so evaluation stays pure and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityMode {
    Whitelist,
    Blacklist,
}

impl SecurityMode {
    /// Parse from string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "whitelist" => Some(SecurityMode::Whitelist),
            "blacklist" => Some(SecurityMode::Blacklist),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityMode::Whitelist => "whitelist",
            SecurityMode::Blacklist => "blacklist",
        }
    }
}

impl Default for SecurityMode {
    /// Default-allow, consistent with the gate's fail-open stance.
    fn default() -> Self {
        SecurityMode::Blacklist
    }
}

impl fmt::Display for SecurityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_active() -> bool {
    true
}

/// A domain access rule.
///
/// Invariants (enforced by `policy::validate` before a rule is persisted):
/// `domain` is lowercase, carries no protocol or path, and wildcard rules
/// use exactly one leading `*.` segment. Rules are immutable once matched
/// against; ranking is imposed at query time, not at storage time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRule {
    /// Either `example.com` or `*.example.com`
    pub domain: String,

    /// Which list this rule belongs to
    pub kind: RuleKind,

    /// Inactive rules never match
    #[serde(default = "default_active")]
    pub active: bool,
}

impl DomainRule {
    /// Create an active rule.
    pub fn new(domain: impl Into<String>, kind: RuleKind) -> Self {
        DomainRule {
            domain: domain.into(),
            kind,
            active: true,
        }
    }

    /// True if this is a wildcard (`*.base`) rule.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.domain.starts_with("*.")
    }

    /// The rule domain with any `*.` prefix stripped.
    #[inline]
    pub fn base_domain(&self) -> &str {
        self.domain.strip_prefix("*.").unwrap_or(&self.domain)
    }

    /// Check whether this rule matches a target domain.
    ///
    /// Exact rules match only the identical domain. Wildcard rules match the
    /// base domain itself and any of its subdomains.
    pub fn matches(&self, target: &str) -> bool {
        match self.domain.strip_prefix("*.") {
            Some(base) => target == base || target.ends_with(&format!(".{base}")),
            None => target == self.domain,
        }
    }
}
