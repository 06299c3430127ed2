// src/storage/traits.rs
use async_trait::async_trait;

use crate::domain::{DomainRule, SecurityMode};

/// Rule store collaborator consumed by the access gate.
///
/// The evaluator itself never fetches anything; callers read the mode and
/// the active rules through this trait and hand them over as a snapshot.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// All currently-active domain rules, normalized lowercase.
    async fn list_active_rules(&self) -> anyhow::Result<Vec<DomainRule>>;

    /// The current system-wide security mode.
    async fn security_mode(&self) -> anyhow::Result<SecurityMode>;

    /// Mode and rules read together.
    ///
    /// Implementations backed by a single source should override this to
    /// read both from the same snapshot.
    async fn snapshot(&self) -> anyhow::Result<(SecurityMode, Vec<DomainRule>)> {
        let mode = self.security_mode().await?;
        let rules = self.list_active_rules().await?;
        Ok((mode, rules))
    }
}
