use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Lowercase alphanumerics and hyphens per label, no leading/trailing
/// hyphen, labels separated by dots, no empty labels.
static HOSTNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)*$")
        .expect("invalid hostname regex")
});

/// Errors rejected by rule-syntax validation.
///
/// Validation runs in the rule store before a rule is persisted; the
/// evaluator itself assumes rules already satisfy these invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleSyntaxError {
    #[error("rule domain must not contain a protocol: {0}")]
    HasProtocol(String),

    #[error("rule domain must not contain a path: {0}")]
    HasPath(String),

    #[error("malformed wildcard rule (expected *.hostname): {0}")]
    BadWildcard(String),

    #[error("invalid hostname: {0}")]
    BadHostname(String),
}

/// Normalize a domain before validation or matching: trim and lowercase.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().to_ascii_lowercase()
}

/// True if `s` is a bare, already-normalized hostname.
pub fn is_valid_hostname(s: &str) -> bool {
    !s.is_empty() && s.len() <= 253 && HOSTNAME_RE.is_match(s)
}

/// Validate a (normalized) rule domain: `example.com` or `*.example.com`.
pub fn validate_rule_domain(domain: &str) -> Result<(), RuleSyntaxError> {
    if domain.contains("://") {
        return Err(RuleSyntaxError::HasProtocol(domain.to_string()));
    }
    if domain.contains('/') {
        return Err(RuleSyntaxError::HasPath(domain.to_string()));
    }

    if let Some(base) = domain.strip_prefix("*.") {
        // Exactly one leading *. segment
        if base.contains('*') || !is_valid_hostname(base) {
            return Err(RuleSyntaxError::BadWildcard(domain.to_string()));
        }
        return Ok(());
    }

    if domain.contains('*') || !is_valid_hostname(domain) {
        return Err(RuleSyntaxError::BadHostname(domain.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_exact_domains() {
        for domain in ["example.com", "a.b.example.com", "my-site.co.uk", "localhost"] {
            assert!(validate_rule_domain(domain).is_ok(), "{domain} should be valid");
        }
    }

    #[test]
    fn test_valid_wildcard_domains() {
        for domain in ["*.example.com", "*.sub.example.com"] {
            assert!(validate_rule_domain(domain).is_ok(), "{domain} should be valid");
        }
    }

    #[test]
    fn test_rejects_protocol_and_path() {
        assert_eq!(
            validate_rule_domain("https://example.com"),
            Err(RuleSyntaxError::HasProtocol("https://example.com".into()))
        );
        assert_eq!(
            validate_rule_domain("example.com/path"),
            Err(RuleSyntaxError::HasPath("example.com/path".into()))
        );
    }

    #[test]
    fn test_rejects_malformed_wildcards() {
        for domain in ["*.", "*.*.example.com", "*example.com", "a.*.example.com", "**.example.com"] {
            assert!(validate_rule_domain(domain).is_err(), "{domain} should be rejected");
        }
    }

    #[test]
    fn test_rejects_bad_hostnames() {
        for domain in ["", "exa mple.com", "example..com", ".example.com", "example.com.", "-example.com", "exam_ple.com", "EXAMPLE.com"] {
            assert!(validate_rule_domain(domain).is_err(), "{domain:?} should be rejected");
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_domain("  Example.COM "), "example.com");
    }

    #[test]
    fn test_hostname_length_cap() {
        let long = "a.".repeat(200) + "com";
        assert!(!is_valid_hostname(&long));
    }
}
