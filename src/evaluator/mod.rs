//! Domain access evaluator.
//!
//! Pure, synchronous, side-effect-free: callers supply a consistent snapshot
//! of active rules and the current mode, and may invoke this from any number
//! of request-handling tasks without locking. It never panics on malformed
//! input; an invalid target is a denial, not an error.

use crate::domain::{AccessDecision, DenyReason, DomainRule, RuleKind, SecurityMode};
use crate::policy::validate::is_valid_hostname;

/// Evaluate whether navigation to `target` is permitted.
///
/// Matching rules are ranked by a `(is_wildcard, domain_len)` priority key,
/// highest first: any wildcard rule outranks any exact rule, and among rules
/// of the same wildcard-ness the longer domain string wins. The sort is
/// stable, so equal keys keep their original relative order and the result
/// is deterministic for a given input order.
///
/// Note the ranking is deliberate but debatable: a wildcard whitelist rule
/// beats a more specific exact blacklist rule for a subdomain, so a
/// known-bad subdomain stays reachable under a wildcard-whitelisted parent.
/// Preserved as-is for compatibility with the deployed policy.
pub fn evaluate(target: &str, mode: SecurityMode, rules: &[DomainRule]) -> AccessDecision {
    let target = target.trim().to_ascii_lowercase();

    if !is_valid_hostname(&target) {
        return AccessDecision::deny(DenyReason::InvalidDomain);
    }

    let mut matched: Vec<&DomainRule> = rules
        .iter()
        .filter(|rule| rule.active && rule.matches(&target))
        .collect();

    let Some(top) = top_ranked(&mut matched) else {
        // Default when nothing matched: whitelist denies, blacklist allows.
        return match mode {
            SecurityMode::Whitelist => AccessDecision::deny(DenyReason::NotInWhitelist),
            SecurityMode::Blacklist => AccessDecision::allow(),
        };
    };

    match (mode, top.kind) {
        (SecurityMode::Whitelist, RuleKind::Whitelist) => {
            AccessDecision::allow_matched(&top.domain)
        }
        (SecurityMode::Whitelist, RuleKind::Blacklist) => {
            AccessDecision::deny_matched(DenyReason::NotInWhitelist, &top.domain)
        }
        (SecurityMode::Blacklist, RuleKind::Blacklist) => {
            AccessDecision::deny_matched(DenyReason::InBlacklist, &top.domain)
        }
        (SecurityMode::Blacklist, RuleKind::Whitelist) => {
            AccessDecision::allow_matched(&top.domain)
        }
    }
}

/// Priority key: wildcard-ness first, then domain length.
#[inline]
fn rank(rule: &DomainRule) -> (bool, usize) {
    (rule.is_wildcard(), rule.domain.len())
}

/// Stable descending sort; ties keep original relative order.
fn top_ranked<'a>(matched: &mut [&'a DomainRule]) -> Option<&'a DomainRule> {
    matched.sort_by(|a, b| rank(b).cmp(&rank(a)));
    matched.first().copied()
}
