pub mod ledger;
pub mod notifier;
pub mod review_sink;
pub mod scorer;

pub use ledger::AppliedLedger;
pub use notifier::{EmailNotifier, Notifier};
pub use review_sink::ReviewSink;
pub use scorer::{RelevanceScorer, Scorer};
