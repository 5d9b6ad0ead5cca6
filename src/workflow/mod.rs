pub mod apply_flow;

pub use apply_flow::{ApplyFlow, FlowOutcome};
