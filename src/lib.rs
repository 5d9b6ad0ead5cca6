//! # Job Apply Agent
//!
//! Discovers internship/job postings across several platforms, filters
//! them by AI-judged relevance, attempts an automated application on the
//! posting's own site, and records outcomes so no job is processed twice.
//!
//! ## Architecture
//!
//! The crate follows a strict layered design:
//!
//! ### Infrastructure layer
//! - `infrastructure/` - holds scarce resources, exposes capabilities only
//! - `PageDriver` - the single page owner; navigation, eval, input
//! - `BrowserSession` - session guard with guaranteed release
//!
//! ### Capability layer (services, sources, apply)
//! - `services/` - single-posting capabilities, no flow knowledge
//!   (`RelevanceScorer`, `AppliedLedger`, `ReviewSink`, `EmailNotifier`)
//! - `sources/` - one listing adapter per platform, never-fails contract
//! - `apply/` - one submission state machine per platform behind
//!   `ApplyDriver`
//!
//! ### Workflow layer
//! - `workflow/` - the complete decision path for one posting
//!   (score → relevance gate → dispatch)
//!
//! ### Orchestration layer
//! - `orchestrator/` - the sequential run loop; sole owner of counters,
//!   ledger and review sink
//!
//! ## Module structure

pub mod apply;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod sources;
pub mod workflow;

// Re-export the common types
pub use apply::{ApplyDriver, ApplyOutcome};
pub use config::{Config, Credentials};
pub use error::{AgentError, AgentResult};
pub use infrastructure::{BrowserSession, PageDriver};
pub use models::{JobSite, Posting, ReviewRecord, RunStats, ScoreResult};
pub use orchestrator::App;
pub use services::{AppliedLedger, EmailNotifier, Notifier, RelevanceScorer, ReviewSink, Scorer};
pub use sources::JobSource;
pub use workflow::{ApplyFlow, FlowOutcome};
