// src/storage/snapshot.rs
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::{DomainRule, SecurityMode};
use crate::policy::RuleSnapshot;

use super::traits::RuleStore;

/// Rule store backed by a watch channel of rule snapshots.
///
/// This is the long-running redirect-flow wiring: a `RulesWatcher` reloads
/// the rules file in the background and this store serves whatever snapshot
/// is current. Mode and rules always come from the same snapshot, so a
/// reload can never be observed half-applied.
pub struct SnapshotRuleStore {
    rx: watch::Receiver<Arc<RuleSnapshot>>,
}

impl SnapshotRuleStore {
    pub fn new(rx: watch::Receiver<Arc<RuleSnapshot>>) -> Self {
        SnapshotRuleStore { rx }
    }

    /// Version of the currently-served snapshot.
    pub fn version(&self) -> String {
        self.rx.borrow().version.clone()
    }
}

#[async_trait]
impl RuleStore for SnapshotRuleStore {
    async fn list_active_rules(&self) -> anyhow::Result<Vec<DomainRule>> {
        Ok(self
            .rx
            .borrow()
            .rules
            .iter()
            .filter(|r| r.active)
            .cloned()
            .collect())
    }

    async fn security_mode(&self) -> anyhow::Result<SecurityMode> {
        Ok(self.rx.borrow().mode)
    }

    async fn snapshot(&self) -> anyhow::Result<(SecurityMode, Vec<DomainRule>)> {
        // Single borrow so mode and rules come from the same snapshot
        let snapshot = self.rx.borrow().clone();
        let rules = snapshot.rules.iter().filter(|r| r.active).cloned().collect();
        Ok((snapshot.mode, rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RuleKind;
    use chrono::Utc;

    fn snapshot(version: &str, mode: SecurityMode, rules: Vec<DomainRule>) -> Arc<RuleSnapshot> {
        Arc::new(RuleSnapshot {
            version: version.to_string(),
            mode,
            rules,
            loaded_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_serves_current_snapshot() {
        let initial = snapshot(
            "v1",
            SecurityMode::Whitelist,
            vec![DomainRule::new("example.com", RuleKind::Whitelist)],
        );
        let (tx, rx) = watch::channel(initial);
        let store = SnapshotRuleStore::new(rx);

        let (mode, rules) = store.snapshot().await.unwrap();
        assert_eq!(mode, SecurityMode::Whitelist);
        assert_eq!(rules.len(), 1);
        assert_eq!(store.version(), "v1");

        // Broadcast an update; the store follows
        tx.send(snapshot("v2", SecurityMode::Blacklist, vec![])).unwrap();

        let (mode, rules) = store.snapshot().await.unwrap();
        assert_eq!(mode, SecurityMode::Blacklist);
        assert!(rules.is_empty());
        assert_eq!(store.version(), "v2");
    }

    #[tokio::test]
    async fn test_filters_inactive_rules() {
        let mut inactive = DomainRule::new("old.com", RuleKind::Blacklist);
        inactive.active = false;

        let (_tx, rx) = watch::channel(snapshot(
            "v1",
            SecurityMode::Blacklist,
            vec![inactive, DomainRule::new("bad.com", RuleKind::Blacklist)],
        ));
        let store = SnapshotRuleStore::new(rx);

        let rules = store.list_active_rules().await.unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].domain, "bad.com");
    }
}
