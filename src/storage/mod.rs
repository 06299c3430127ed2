pub mod memory;
pub mod postgres;
pub mod snapshot;
pub mod traits;

pub use memory::MemoryRuleStore;
pub use postgres::PgRuleStore;
pub use snapshot::SnapshotRuleStore;
pub use traits::RuleStore;
