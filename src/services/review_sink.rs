//! Manual-review sink - business capability layer
//!
//! Accumulates relevance-gated postings that could not be auto-submitted.
//! The export is a full replace: each run's file reflects only that run's
//! unresolved matches.

use std::path::Path;

use tracing::debug;

use crate::error::{AgentError, AgentResult};
use crate::models::ReviewRecord;

/// Manual-review sink
#[derive(Default)]
pub struct ReviewSink {
    records: Vec<ReviewRecord>,
}

impl ReviewSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ReviewRecord) {
        debug!(
            "Review entry: {} | {} | {}",
            record.source, record.title, record.apply_status
        );
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rewrite the review CSV wholesale and return the row count.
    ///
    /// Columns: source, title, company, link, score, summary, apply_status.
    pub fn export(&self, path: impl AsRef<Path>) -> AgentResult<usize> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| AgentError::ReviewExport {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = csv::Writer::from_writer(file);

        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(|source| AgentError::ReviewExport {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobSite, Posting, ScoreResult};
    use std::path::PathBuf;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("matched_jobs_{}_{}.csv", tag, std::process::id()))
    }

    fn sample_record(title: &str, status: &str) -> ReviewRecord {
        let posting = Posting {
            site: JobSite::LinkedIn,
            title: title.to_string(),
            company: "LinkedIn".to_string(),
            link: Some(format!("https://www.linkedin.com/jobs/{title}")),
            location: None,
        };
        ReviewRecord::new(&posting, &ScoreResult::scored(8, "strong ML match"), status)
    }

    #[test]
    fn export_writes_header_and_rows() {
        let path = temp_path("rows");
        let mut sink = ReviewSink::new();
        sink.push(sample_record("ml-intern", "Complex flow (manual)"));
        sink.push(sample_record("ai-intern", "Easy Apply not found"));

        let count = sink.export(&path).unwrap();
        assert_eq!(count, 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "source,title,company,link,score,summary,apply_status"
        );
        assert!(contents.contains("Complex flow (manual)"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn export_is_full_replace() {
        let path = temp_path("replace");

        let mut first = ReviewSink::new();
        first.push(sample_record("stale", "Apply button not found"));
        first.push(sample_record("stale-2", "Apply button not found"));
        first.export(&path).unwrap();

        let mut second = ReviewSink::new();
        second.push(sample_record("fresh", "No credentials"));
        second.export(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale"));
        assert!(contents.contains("fresh"));
        assert_eq!(contents.lines().count(), 2);

        std::fs::remove_file(&path).ok();
    }
}
