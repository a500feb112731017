//! Metrics sampling — a stand-in for real attention/positivity/confidence analysis.
//!
//! `AppState` holds an `Arc<dyn MetricsSampler>`, so a genuine signal-processing
//! backend can replace `RandomMetricsSampler` without touching the state machine.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::models::interview::Metrics;

/// Inclusive bounds for every synthetic score.
pub const SCORE_RANGE: RangeInclusive<u8> = 70..=95;

pub trait MetricsSampler: Send + Sync {
    fn sample(&self) -> Metrics;
}

/// Draws each dimension independently and uniformly from [`SCORE_RANGE`].
/// No state is kept between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomMetricsSampler;

impl MetricsSampler for RandomMetricsSampler {
    fn sample(&self) -> Metrics {
        let mut rng = rand::thread_rng();
        Metrics {
            attention: rng.gen_range(SCORE_RANGE),
            positivity: rng.gen_range(SCORE_RANGE),
            confidence: rng.gen_range(SCORE_RANGE),
        }
    }
}

/// Always returns the same triple. Used by tests that need a known assessment.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedMetricsSampler(pub Metrics);

#[cfg(test)]
impl MetricsSampler for FixedMetricsSampler {
    fn sample(&self) -> Metrics {
        self.0
    }
}
