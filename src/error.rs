use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the durable stores.
///
/// Most of the pipeline degrades faults to logged non-outcomes instead of
/// erroring; only the persistence layer (ledger append, review export)
/// surfaces typed errors to the orchestrator.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Appending a URL to the applied-jobs ledger failed.
    #[error("ledger append failed ({path}): {source}")]
    LedgerAppend {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating or replacing the manual-review CSV failed.
    #[error("review export failed ({path}): {source}")]
    ReviewExport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing a review row failed.
    #[error("review row serialization failed: {0}")]
    ReviewSerialize(#[from] csv::Error),
}

/// Result alias for store operations.
pub type AgentResult<T> = Result<T, AgentError>;
