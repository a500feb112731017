// Interview engine: question bank, metric sampling, the per-session state machine,
// and the in-memory session store. HTTP handlers live alongside.

pub mod handlers;
pub mod metrics;
pub mod questions;
pub mod state_machine;
pub mod store;

pub use metrics::{MetricsSampler, RandomMetricsSampler};
pub use questions::QuestionBank;
pub use store::SessionStore;
