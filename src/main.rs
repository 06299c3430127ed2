use std::sync::Arc;

use clap::Parser;
use tracing::info;

use linkgate::config::Config;
use linkgate::gate::AccessGate;
use linkgate::observability::init_tracing;
use linkgate::policy::{RulesLoader, RulesWatcher};
use linkgate::storage::{PgRuleStore, RuleStore, SnapshotRuleStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    init_tracing(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting linkgate access check"
    );

    // Build the rule store: Postgres when configured, otherwise the rules
    // file behind a background reloader.
    let mut watcher_handle = None;
    let store: Arc<dyn RuleStore> = if let Some(ref database_url) = config.database_url {
        info!("Using Postgres rule store");
        Arc::new(
            PgRuleStore::connect(
                database_url,
                config.db_min_connections,
                config.db_max_connections,
            )
            .await?,
        )
    } else {
        let loader = RulesLoader::new(config.rules_path.to_string_lossy());
        let watcher = RulesWatcher::new(loader, config.rules_reload_interval());
        let (rules_rx, handle) = watcher.start();
        watcher_handle = Some(handle);
        Arc::new(SnapshotRuleStore::new(rules_rx))
    };

    let gate = AccessGate::new(store);
    let decision = gate.check_url(&config.target).await;

    info!(
        target = %config.target,
        allowed = decision.allowed,
        "Access check completed"
    );

    println!("{}", serde_json::to_string_pretty(&decision)?);

    if let Some(handle) = watcher_handle {
        handle.abort();
    }

    if !decision.allowed {
        std::process::exit(2);
    }

    Ok(())
}
