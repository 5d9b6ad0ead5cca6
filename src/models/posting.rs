//! Core data types
//!
//! Everything a run passes between layers: normalized postings, LLM score
//! results, manual-review rows and the run counters.

use std::fmt::Display;

use serde::Serialize;

/// The closed set of supported platforms.
///
/// Each variant has exactly one JobSource adapter and one ApplyDriver;
/// adding a platform means adding a variant plus those two pieces, never
/// touching the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JobSite {
    LinkedIn,
    Internshala,
    Wellfound,
    Jobright,
}

impl JobSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSite::LinkedIn => "LinkedIn",
            JobSite::Internshala => "Internshala",
            JobSite::Wellfound => "Wellfound",
            JobSite::Jobright => "Jobright",
        }
    }
}

impl Display for JobSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized job/internship listing.
///
/// The link is the natural key; title/company are display-only. Postings
/// are immutable once produced by an adapter and live only for the run
/// unless promoted into the ledger or the review sink.
#[derive(Debug, Clone)]
pub struct Posting {
    pub site: JobSite,
    pub title: String,
    pub company: String,
    pub link: Option<String>,
    pub location: Option<String>,
}

impl Posting {
    /// Description string handed to the relevance scorer.
    pub fn description(&self) -> String {
        format!("{} at {} ({})", self.title, self.company, self.site)
    }
}

/// AI relevance verdict for one posting. Score range is 1-10; 0 is
/// reserved for "could not be scored" and always fails the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    pub score: u8,
    pub summary: String,
}

impl ScoreResult {
    pub fn scored(score: u8, summary: impl Into<String>) -> Self {
        Self {
            score,
            summary: summary.into(),
        }
    }

    /// Degraded result for faults and unparseable model output.
    pub fn unscored(summary: impl Into<String>) -> Self {
        Self {
            score: 0,
            summary: summary.into(),
        }
    }
}

/// One row of the manual-review export.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRecord {
    pub source: JobSite,
    pub title: String,
    pub company: String,
    pub link: String,
    pub score: u8,
    pub summary: String,
    pub apply_status: String,
}

impl ReviewRecord {
    pub fn new(posting: &Posting, score: &ScoreResult, apply_status: impl Into<String>) -> Self {
        Self {
            source: posting.site,
            title: posting.title.clone(),
            company: posting.company.clone(),
            link: posting.link.clone().unwrap_or_default(),
            score: score.score,
            summary: score.summary.clone(),
            apply_status: apply_status.into(),
        }
    }
}

/// Per-run counters, owned exclusively by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Postings collected across all sources
    pub fetched: usize,
    /// Successful submissions (bounded by the configured cap)
    pub applied: usize,
    /// Postings routed to manual review
    pub review: usize,
    /// Skipped: missing link or already in the ledger
    pub skipped_seen: usize,
    /// Skipped: below the relevance threshold
    pub skipped_low_score: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_display_names() {
        assert_eq!(JobSite::LinkedIn.to_string(), "LinkedIn");
        assert_eq!(JobSite::Internshala.to_string(), "Internshala");
        assert_eq!(JobSite::Wellfound.to_string(), "Wellfound");
        assert_eq!(JobSite::Jobright.to_string(), "Jobright");
    }

    #[test]
    fn description_carries_title_company_and_site() {
        let posting = Posting {
            site: JobSite::Internshala,
            title: "ML Intern".to_string(),
            company: "Acme".to_string(),
            link: Some("https://internshala.com/internship/ml".to_string()),
            location: None,
        };
        assert_eq!(posting.description(), "ML Intern at Acme (Internshala)");
    }

    #[test]
    fn unscored_is_zero() {
        let result = ScoreResult::unscored("Analysis failed");
        assert_eq!(result.score, 0);
    }

    #[test]
    fn review_record_blank_link_for_missing_url() {
        let posting = Posting {
            site: JobSite::Wellfound,
            title: "Intern".to_string(),
            company: "Wellfound".to_string(),
            link: None,
            location: None,
        };
        let record = ReviewRecord::new(&posting, &ScoreResult::scored(7, "ok"), "No credentials");
        assert_eq!(record.link, "");
        assert_eq!(record.apply_status, "No credentials");
    }
}
