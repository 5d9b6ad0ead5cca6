//! Applied-jobs ledger - business capability layer
//!
//! The sole source of truth for "already handled". Loaded once per run as
//! a point-in-time snapshot; each confirmed submission is appended to the
//! durable store and mirrored into the snapshot.
//!
//! Not transactional with the apply attempt: a crash between submission
//! and `record` can produce one duplicate attempt on a future run. That
//! is an accepted, bounded risk.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{AgentError, AgentResult};

/// Applied-jobs ledger
///
/// Responsibilities:
/// - membership test against the in-memory snapshot
/// - durable append-only persistence, one URL per line
/// - never invents order or dedup beyond exact URL equality
pub struct AppliedLedger {
    path: PathBuf,
    entries: HashSet<String>,
}

impl AppliedLedger {
    /// Load the ledger snapshot.
    ///
    /// Fails open: a missing or unreadable store yields an empty ledger
    /// rather than aborting the run.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) => {
                if path.exists() {
                    warn!("Ledger unreadable ({}), starting empty: {}", path.display(), e);
                }
                HashSet::new()
            }
        };
        debug!("Ledger loaded: {} entries from {}", entries.len(), path.display());
        Self { path, entries }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a URL after a confirmed successful submission.
    ///
    /// The in-memory snapshot is updated even when the durable append
    /// fails, so the current run still never re-attempts the URL.
    pub fn record(&mut self, url: &str) -> AgentResult<()> {
        self.entries.insert(url.to_string());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AgentError::LedgerAppend {
                path: self.path.clone(),
                source,
            })?;
        writeln!(file, "{}", url).map_err(|source| AgentError::LedgerAppend {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "applied_jobs_{}_{}.txt",
            tag,
            std::process::id()
        ))
    }

    #[test]
    fn missing_store_fails_open() {
        let ledger = AppliedLedger::load(temp_path("missing"));
        assert!(ledger.is_empty());
        assert!(!ledger.contains("https://x/a"));
    }

    #[test]
    fn record_persists_across_reload() {
        let path = temp_path("reload");
        std::fs::remove_file(&path).ok();

        let mut ledger = AppliedLedger::load(&path);
        ledger.record("https://x/a").unwrap();
        ledger.record("https://x/b").unwrap();
        assert!(ledger.contains("https://x/a"));

        let reloaded = AppliedLedger::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("https://x/b"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn blank_lines_are_ignored() {
        let path = temp_path("blank");
        std::fs::write(&path, "https://x/a\n\n  \nhttps://x/b\n").unwrap();

        let ledger = AppliedLedger::load(&path);
        assert_eq!(ledger.len(), 2);

        std::fs::remove_file(&path).ok();
    }
}
