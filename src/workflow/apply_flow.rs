//! Per-posting flow - workflow layer
//!
//! Core responsibility: the complete decision path for one posting.
//!
//! Order:
//! 1. score via the relevance scorer
//! 2. gate against the configured threshold
//! 3. dispatch to the platform's apply driver
//!
//! Holds no run state: the ledger, counters and review sink stay with
//! the orchestrator. The flow only reports what happened.

use tracing::info;

use crate::apply::{
    ApplyDriver, InternshalaApply, JobrightApply, LinkedInApply, WellfoundApply,
};
use crate::config::Config;
use crate::models::{Posting, ScoreResult};
use crate::services::{RelevanceScorer, Scorer};

/// What the flow decided for one posting.
#[derive(Debug)]
pub enum FlowOutcome {
    /// Failed the relevance gate; never a review candidate.
    BelowThreshold(ScoreResult),
    /// Driver confirmed submission; orchestrator records and notifies.
    Applied {
        score: ScoreResult,
        reason: String,
    },
    /// Passed the gate but could not be auto-submitted.
    NeedsReview {
        score: ScoreResult,
        reason: String,
    },
}

/// Per-posting flow
///
/// Responsibilities:
/// - score one posting and apply the relevance gate
/// - route to the matching apply driver
/// - never touch ledger, counters or sink
pub struct ApplyFlow {
    scorer: Box<dyn Scorer>,
    drivers: Vec<Box<dyn ApplyDriver>>,
    config: Config,
}

impl ApplyFlow {
    /// Wire the production scorer and the full driver set.
    pub fn new(config: &Config) -> Self {
        let drivers: Vec<Box<dyn ApplyDriver>> = vec![
            Box::new(LinkedInApply::new(config)),
            Box::new(InternshalaApply::new(config)),
            Box::new(WellfoundApply::new(config)),
            Box::new(JobrightApply::new(config)),
        ];
        Self::with_parts(config, Box::new(RelevanceScorer::new(config)), drivers)
    }

    /// Assemble from explicit parts. Tests inject stubs here.
    pub fn with_parts(
        config: &Config,
        scorer: Box<dyn Scorer>,
        drivers: Vec<Box<dyn ApplyDriver>>,
    ) -> Self {
        Self {
            scorer,
            drivers,
            config: config.clone(),
        }
    }

    pub async fn run(&self, posting: &Posting) -> FlowOutcome {
        let score = self.scorer.score(&posting.description()).await;
        info!(
            "→ {} | {} | score {}",
            posting.site, posting.title, score.score
        );

        if score.score < self.config.relevance_threshold {
            return FlowOutcome::BelowThreshold(score);
        }
        info!("  ⭐ Selected for apply: {}", posting.title);

        // The orchestrator guards against missing links before scoring;
        // this is the flow's own guard for direct callers
        let Some(url) = posting.link.as_deref().filter(|u| !u.is_empty()) else {
            return FlowOutcome::NeedsReview {
                score,
                reason: "Missing posting URL".to_string(),
            };
        };

        let Some(driver) = self.drivers.iter().find(|d| d.site() == posting.site) else {
            return FlowOutcome::NeedsReview {
                score,
                reason: format!("No apply driver for {}", posting.site),
            };
        };

        let outcome = driver
            .apply(
                url,
                self.config.credentials_for(posting.site),
                self.config.headless,
            )
            .await;

        if outcome.submitted {
            FlowOutcome::Applied {
                score,
                reason: outcome.reason,
            }
        } else {
            FlowOutcome::NeedsReview {
                score,
                reason: outcome.reason,
            }
        }
    }
}
