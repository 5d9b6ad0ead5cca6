//! ApplyDrivers - one automated-submission state machine per platform
//!
//! Shared flow shape: acquire a scoped browser session, log in when the
//! platform requires it, navigate to the posting, locate an apply control
//! by label, and either submit directly or walk a bounded multi-step
//! wizard. Every driver converts internal faults into a normal
//! `(submitted=false, reason)` outcome at its boundary; the orchestrator
//! never sees an error from an apply attempt.
//!
//! `submitted=false` is not an error. It means "route to manual review".

pub mod internshala;
pub mod jobright;
pub mod linkedin;
pub mod wellfound;

use async_trait::async_trait;

use crate::config::Credentials;
use crate::models::JobSite;

pub use internshala::InternshalaApply;
pub use jobright::JobrightApply;
pub use linkedin::LinkedInApply;
pub use wellfound::WellfoundApply;

/// Tri-state apply result flattened to the shared return contract:
/// submitted, not-submitted-with-reason, or a driver fault already
/// converted into a reason string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub submitted: bool,
    pub reason: String,
}

impl ApplyOutcome {
    pub fn submitted(reason: impl Into<String>) -> Self {
        Self {
            submitted: true,
            reason: reason.into(),
        }
    }

    pub fn not_submitted(reason: impl Into<String>) -> Self {
        Self {
            submitted: false,
            reason: reason.into(),
        }
    }
}

/// Per-platform automated submission capability.
///
/// One concrete implementation per platform; new platforms add an
/// implementation and a [`JobSite`] variant, never orchestrator changes.
#[async_trait]
pub trait ApplyDriver: Send + Sync {
    fn site(&self) -> JobSite;

    /// Attempt an application on the posting's own site.
    ///
    /// Must not propagate faults: browser launch failures, missing
    /// credentials, verification challenges, absent controls and
    /// anything unexpected all come back as `(false, reason)`.
    async fn apply(
        &self,
        job_url: &str,
        credentials: Option<&Credentials>,
        headless: bool,
    ) -> ApplyOutcome;
}

/// Submit-type control labels shared by the wizard walkers.
pub(crate) const SUBMIT_LABELS: &[&str] = &["Submit", "Done", "Apply"];
/// Advance-type control labels shared by the wizard walkers.
pub(crate) const NEXT_LABELS: &[&str] = &["Next", "Continue"];
