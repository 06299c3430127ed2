// src/storage/memory.rs
use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{DomainRule, SecurityMode};
use crate::policy::RuleSnapshot;

use super::traits::RuleStore;

/// In-memory rule store for tests and the file-backed CLI path.
#[derive(Debug, Default)]
pub struct MemoryRuleStore {
    rules: Mutex<Vec<DomainRule>>,
    mode: Mutex<SecurityMode>,
    unavailable: Mutex<bool>,
}

impl MemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a loaded rules snapshot.
    pub fn from_snapshot(snapshot: &RuleSnapshot) -> Self {
        let store = Self::new();
        store.set_mode(snapshot.mode);
        *store.rules.lock() = snapshot.rules.clone();
        store
    }

    /// Add a rule (for testing).
    pub fn add_rule(&self, rule: DomainRule) {
        self.rules.lock().push(rule);
    }

    /// Set the security mode (for testing).
    pub fn set_mode(&self, mode: SecurityMode) {
        *self.mode.lock() = mode;
    }

    /// Make subsequent reads fail (for exercising the fail-open path).
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock() = unavailable;
    }

    fn check_available(&self) -> anyhow::Result<()> {
        if *self.unavailable.lock() {
            return Err(anyhow!("rule store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl RuleStore for MemoryRuleStore {
    async fn list_active_rules(&self) -> anyhow::Result<Vec<DomainRule>> {
        self.check_available()?;
        Ok(self
            .rules
            .lock()
            .iter()
            .filter(|r| r.active)
            .cloned()
            .collect())
    }

    async fn security_mode(&self) -> anyhow::Result<SecurityMode> {
        self.check_available()?;
        Ok(*self.mode.lock())
    }
}
