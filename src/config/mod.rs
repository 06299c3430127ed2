use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Access gate configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "linkgate")]
#[command(about = "Domain access gate for short-link redirects")]
pub struct Config {
    /// Target URL (or bare domain) to check
    pub target: String,

    /// Path to rules YAML file
    #[arg(long, default_value = "rules.yaml", env = "LINKGATE_RULES_PATH")]
    pub rules_path: PathBuf,

    /// Postgres URL for the rule store (overrides the rules file when set)
    #[arg(long, env = "LINKGATE_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Rules file reload check interval in seconds
    #[arg(long, default_value = "30", env = "LINKGATE_RULES_RELOAD_SECS")]
    pub rules_reload_secs: u64,

    /// Minimum database pool connections
    #[arg(long, default_value = "1", env = "LINKGATE_DB_MIN_CONNECTIONS")]
    pub db_min_connections: u32,

    /// Maximum database pool connections
    #[arg(long, default_value = "5", env = "LINKGATE_DB_MAX_CONNECTIONS")]
    pub db_max_connections: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,
}

impl Config {
    /// Get rules reload interval as Duration.
    pub fn rules_reload_interval(&self) -> Duration {
        Duration::from_secs(self.rules_reload_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target: String::new(),
            rules_path: PathBuf::from("rules.yaml"),
            database_url: None,
            rules_reload_secs: 30,
            db_min_connections: 1,
            db_max_connections: 5,
            log_level: "info".to_string(),
        }
    }
}
