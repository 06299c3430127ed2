use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::interval;
use tracing::{error, info, warn};

use super::loader::{RuleSnapshot, RulesError, RulesLoader};

/// Watch the rules file for changes and broadcast updates.
///
/// Callers read a consistent `RuleSnapshot` from the watch channel per
/// evaluation; staleness between reloads is accepted (eventual consistency).
pub struct RulesWatcher {
    loader: RulesLoader,
    check_interval: Duration,
    last_version: Option<String>,
}

impl RulesWatcher {
    /// Create a new rules watcher.
    pub fn new(loader: RulesLoader, check_interval: Duration) -> Self {
        RulesWatcher {
            loader,
            check_interval,
            last_version: None,
        }
    }

    /// Start watching for rules changes.
    ///
    /// Returns a receiver that will receive new RuleSnapshot instances when
    /// the rules file's version changes.
    pub fn start(mut self) -> (watch::Receiver<Arc<RuleSnapshot>>, tokio::task::JoinHandle<()>) {
        // Load initial rules
        let initial = match self.loader.load() {
            Ok(snapshot) => {
                self.last_version = Some(snapshot.version.clone());
                info!(
                    version = %snapshot.version,
                    mode = %snapshot.mode,
                    rules = snapshot.rules.len(),
                    "Loaded initial rules"
                );
                Arc::new(snapshot)
            }
            Err(e) => {
                error!("Failed to load initial rules: {}", e);
                Arc::new(RuleSnapshot::empty())
            }
        };

        let (tx, rx) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            let mut interval = interval(self.check_interval);

            loop {
                interval.tick().await;

                match self.check_for_updates(&tx) {
                    Ok(true) => info!("Rules reloaded successfully"),
                    Ok(false) => {} // No changes
                    Err(e) => warn!("Error checking for rules updates: {}", e),
                }
            }
        });

        (rx, handle)
    }

    /// Check for rules updates and broadcast if the version changed.
    fn check_for_updates(
        &mut self,
        tx: &watch::Sender<Arc<RuleSnapshot>>,
    ) -> Result<bool, RulesError> {
        let snapshot = self.loader.load()?;

        if self.last_version.as_ref() == Some(&snapshot.version) {
            return Ok(false);
        }

        info!(
            "Rules version changed: {:?} -> {}",
            self.last_version, snapshot.version
        );

        self.last_version = Some(snapshot.version.clone());
        let _ = tx.send(Arc::new(snapshot));

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SecurityMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_rules_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
version: "v1"
mode: whitelist
rules:
  - domain: example.com
    kind: whitelist
"#
        )
        .unwrap();
        file
    }

    #[tokio::test]
    async fn test_watcher_initial_load() {
        let file = create_rules_file();

        let loader = RulesLoader::new(file.path().to_string_lossy());
        let watcher = RulesWatcher::new(loader, Duration::from_secs(60));
        let (rx, handle) = watcher.start();

        let snapshot = rx.borrow();
        assert_eq!(snapshot.version, "v1");
        assert_eq!(snapshot.mode, SecurityMode::Whitelist);
        assert_eq!(snapshot.rules.len(), 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_watcher_missing_file_serves_empty_snapshot() {
        let loader = RulesLoader::new("/nonexistent/rules.yaml");
        let watcher = RulesWatcher::new(loader, Duration::from_secs(60));
        let (rx, handle) = watcher.start();

        let snapshot = rx.borrow();
        assert_eq!(snapshot.version, "0.0.0");
        assert!(snapshot.rules.is_empty());

        handle.abort();
    }

    #[tokio::test]
    async fn test_watcher_detects_changes() {
        let file = create_rules_file();
        let rules_path = file.path().to_path_buf();

        let loader = RulesLoader::new(file.path().to_string_lossy());
        let watcher = RulesWatcher::new(loader, Duration::from_millis(50));
        let (mut rx, handle) = watcher.start();

        assert_eq!(rx.borrow().version, "v1");

        // Update rules file
        tokio::time::sleep(Duration::from_millis(10)).await;
        std::fs::write(
            &rules_path,
            r#"
version: "v2"
mode: blacklist
rules:
  - domain: example.com
    kind: whitelist
  - domain: "*.bad.com"
    kind: blacklist
"#,
        )
        .unwrap();

        // Wait for watcher to detect change
        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .expect("Timeout waiting for rules change")
            .unwrap();

        assert_eq!(rx.borrow().version, "v2");
        assert_eq!(rx.borrow().mode, SecurityMode::Blacklist);
        assert_eq!(rx.borrow().rules.len(), 2);

        handle.abort();
    }
}
