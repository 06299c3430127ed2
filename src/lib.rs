pub mod config;
pub mod domain;
pub mod evaluator;
pub mod gate;
pub mod observability;
pub mod policy;
pub mod storage;

pub use config::Config;
pub use domain::{AccessDecision, DenyReason, DomainRule, RuleKind, SecurityMode};
pub use evaluator::evaluate;
pub use gate::{extract_domain, AccessGate};
