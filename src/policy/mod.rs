pub mod hot_reload;
pub mod loader;
pub mod validate;

pub use hot_reload::RulesWatcher;
pub use loader::{load_rules, RuleSnapshot, RulesError, RulesLoader};
pub use validate::{normalize_domain, validate_rule_domain, RuleSyntaxError};
