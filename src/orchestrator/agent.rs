//! Run orchestrator - orchestration layer
//!
//! ## Responsibilities
//!
//! 1. **Initialisation**: wire sources, flow, notifier and ledger
//! 2. **Collection**: pull postings from every source, in source order
//! 3. **Dedup**: skip anything already in the ledger snapshot
//! 4. **Dispatch**: run the per-posting flow until the apply cap
//! 5. **Outcome persistence**: ledger append, review sink, notification
//! 6. **Run statistics**: aggregate and report
//!
//! Execution is strictly sequential: each apply attempt owns an
//! exclusive browser session and platform login, so nothing runs in
//! parallel by design. No fault class aborts the run; the failure mode
//! is "fewer applications than requested".

use anyhow::Result;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::{JobSite, Posting, ReviewRecord, RunStats};
use crate::services::{AppliedLedger, EmailNotifier, Notifier, ReviewSink};
use crate::sources::{
    http_client, InternshalaSource, JobSource, JobrightSource, LinkedInSource, WellfoundSource,
};
use crate::workflow::{ApplyFlow, FlowOutcome};

/// Application orchestrator.
///
/// Sole owner of the run counters; all ledger and review-sink mutation
/// goes through here.
pub struct App {
    config: Config,
    sources: Vec<Box<dyn JobSource>>,
    flow: ApplyFlow,
    notifier: Box<dyn Notifier>,
    ledger: AppliedLedger,
    review: ReviewSink,
}

impl App {
    /// Wire the production components.
    pub async fn initialize(config: Config) -> Result<Self> {
        let client = http_client()?;
        let sources: Vec<Box<dyn JobSource>> = vec![
            Box::new(InternshalaSource::new(
                client.clone(),
                config.search_url_for(JobSite::Internshala),
            )),
            Box::new(LinkedInSource::new(
                client.clone(),
                config.search_url_for(JobSite::LinkedIn),
            )),
            Box::new(WellfoundSource::new(
                client.clone(),
                config.search_url_for(JobSite::Wellfound),
            )),
            Box::new(JobrightSource::new(
                client,
                config.search_url_for(JobSite::Jobright),
            )),
        ];
        let flow = ApplyFlow::new(&config);
        let notifier = Box::new(EmailNotifier::new(&config));

        Ok(Self::with_components(config, sources, flow, notifier))
    }

    /// Assemble from explicit components. Tests inject stubs here.
    pub fn with_components(
        config: Config,
        sources: Vec<Box<dyn JobSource>>,
        flow: ApplyFlow,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        // Point-in-time snapshot; later runs see this run's appends
        let ledger = AppliedLedger::load(&config.applied_jobs_file);
        Self {
            config,
            sources,
            flow,
            notifier,
            ledger,
            review: ReviewSink::new(),
        }
    }

    /// Execute one full run and return its counters.
    pub async fn run(mut self) -> Result<RunStats> {
        log_startup(&self.config, self.ledger.len());

        let postings = self.collect_postings().await;
        info!("📊 Total internships fetched: {}", postings.len());

        let mut stats = RunStats {
            fetched: postings.len(),
            ..Default::default()
        };

        for posting in &postings {
            // Cap check first: once reached, no further scoring either
            if stats.applied >= self.config.max_jobs_to_apply {
                info!("Apply cap of {} reached, stopping.", self.config.max_jobs_to_apply);
                break;
            }

            let Some(url) = posting.link.as_deref().filter(|u| !u.is_empty()) else {
                stats.skipped_seen += 1;
                continue;
            };
            if self.ledger.contains(url) {
                stats.skipped_seen += 1;
                continue;
            }

            match self.flow.run(posting).await {
                FlowOutcome::BelowThreshold(_) => {
                    stats.skipped_low_score += 1;
                }
                FlowOutcome::Applied { score, reason } => {
                    // Durable-append fault must not abort the run; the
                    // in-memory snapshot still blocks re-attempts today
                    if let Err(e) = self.ledger.record(url) {
                        error!("Failed to persist applied URL: {}", e);
                    }
                    stats.applied += 1;
                    info!("✅ Applied to {} ({})", posting.title, posting.site);

                    let subject =
                        format!("Applied to {} at {}", posting.title, posting.company);
                    let body = format!(
                        "Applied to {} ({})\nLink: {}\nReason: {}\nScore: {}\nSummary: {}",
                        posting.title, posting.site, url, reason, score.score, score.summary
                    );
                    self.notifier.notify(&subject, &body).await;
                }
                FlowOutcome::NeedsReview { score, reason } => {
                    warn!(
                        "⚠️ Could not auto-apply ({}). Saving for manual review.",
                        reason
                    );
                    self.review
                        .push(ReviewRecord::new(posting, &score, reason));
                    stats.review += 1;
                }
            }

            // Pacing between postings reduces load on target sites
            if self.config.pace_delay_secs > 0 {
                sleep(Duration::from_secs(self.config.pace_delay_secs)).await;
            }
        }

        if !self.review.is_empty() {
            match self.review.export(&self.config.matched_csv) {
                Ok(count) => info!(
                    "💾 Saved {} manual-review entries to {}",
                    count, self.config.matched_csv
                ),
                Err(e) => error!("Review export failed: {}", e),
            }
        }

        log_run_complete(&stats);
        Ok(stats)
    }

    /// Concatenate all sources in order, no cross-source dedup: a posting
    /// listed on two platforms is legitimately two candidates.
    async fn collect_postings(&self) -> Vec<Posting> {
        let mut postings = Vec::new();
        for source in &self.sources {
            let fetched = source.fetch(self.config.max_jobs_per_site).await;
            info!("✓ {}: {} postings", source.site(), fetched.len());
            postings.extend(fetched);
        }
        postings
    }
}

// ========== Run banner helpers ==========

fn log_startup(config: &Config, ledger_len: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 Starting AI Internship Finder Agent...");
    info!(
        "📊 Apply cap: {} | relevance threshold: {} | ledger: {} URLs",
        config.max_jobs_to_apply, config.relevance_threshold, ledger_len
    );
    info!("{}", "=".repeat(60));
}

fn log_run_complete(stats: &RunStats) {
    info!("{}", "=".repeat(60));
    info!(
        "🎉 Completed at {}. Applied to {} jobs (attempted).",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        stats.applied
    );
    info!(
        "📋 Manual review: {} | skipped seen/no-link: {} | below threshold: {}",
        stats.review, stats.skipped_seen, stats.skipped_low_score
    );
    info!("{}", "=".repeat(60));
}
