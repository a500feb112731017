use std::sync::Arc;

use crate::config::Config;
use crate::interview::{MetricsSampler, QuestionBank, RandomMetricsSampler, SessionStore};
use crate::report::{default_page_config, PageConfig};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub questions: Arc<QuestionBank>,
    /// Pluggable metrics source. Default: RandomMetricsSampler.
    pub metrics: Arc<dyn MetricsSampler>,
    /// Page geometry used by the report builder.
    pub page_config: Arc<PageConfig>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, questions: QuestionBank) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new()),
            questions: Arc::new(questions),
            metrics: Arc::new(RandomMetricsSampler),
            page_config: Arc::new(default_page_config()),
            config,
        }
    }

    #[cfg(test)]
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSampler>) -> Self {
        self.metrics = metrics;
        self
    }
}
