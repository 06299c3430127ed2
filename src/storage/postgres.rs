// src/storage/postgres.rs
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::domain::{DomainRule, RuleKind, SecurityMode};

use super::traits::RuleStore;

/// PostgreSQL implementation of the RuleStore trait.
///
/// Rules are created and deactivated by the admin-facing service; this store
/// only reads. Domains are stored normalized lowercase.
pub struct PgRuleStore {
    pool: PgPool,
}

impl PgRuleStore {
    /// Create a new PgRuleStore instance with a connection pool.
    pub async fn connect(
        database_url: &str,
        min_connections: u32,
        max_connections: u32,
    ) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(min_connections)
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RuleStore for PgRuleStore {
    async fn list_active_rules(&self) -> anyhow::Result<Vec<DomainRule>> {
        let rows = sqlx::query(
            r#"
            SELECT domain, kind
            FROM domain_rules
            WHERE active = true
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut rules = Vec::with_capacity(rows.len());
        for row in rows {
            let domain: String = row.get("domain");
            let kind: String = row.get("kind");

            let Some(kind) = RuleKind::from_str(&kind) else {
                anyhow::bail!("unknown rule kind in domain_rules: {kind}");
            };

            rules.push(DomainRule {
                domain,
                kind,
                active: true,
            });
        }

        Ok(rules)
    }

    async fn security_mode(&self) -> anyhow::Result<SecurityMode> {
        let value: Option<String> = sqlx::query_scalar(
            r#"
            SELECT value
            FROM settings
            WHERE key = 'security_mode'
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        // Missing or unrecognized setting falls back to default-allow
        Ok(value
            .as_deref()
            .and_then(SecurityMode::from_str)
            .unwrap_or_default())
    }
}
