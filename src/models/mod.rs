pub mod posting;

pub use posting::{JobSite, Posting, ReviewRecord, RunStats, ScoreResult};
