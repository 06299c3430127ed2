pub mod access;
pub mod rule;

pub use access::{AccessDecision, DenyReason};
pub use rule::{DomainRule, RuleKind, SecurityMode};
