//! Overall assessment: a fixed sentence picked by thresholding the mean metric score.

use crate::models::interview::Metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl Assessment {
    /// Buckets are closed on the left: 90.0 is Excellent, 89.999 is Good.
    pub fn from_mean(mean: f64) -> Self {
        if mean >= 90.0 {
            Assessment::Excellent
        } else if mean >= 80.0 {
            Assessment::Good
        } else if mean >= 70.0 {
            Assessment::Fair
        } else {
            Assessment::NeedsImprovement
        }
    }

    pub fn for_metrics(metrics: &Metrics) -> Self {
        Self::from_mean(metrics.mean())
    }

    pub fn sentence(self) -> &'static str {
        match self {
            Assessment::Excellent => "Excellent performance! The candidate demonstrated strong communication skills and relevant experience.",
            Assessment::Good => "Good performance! The candidate showed solid understanding and relevant experience.",
            Assessment::Fair => "Fair performance. The candidate has potential but could benefit from more practice.",
            Assessment::NeedsImprovement => "Needs improvement. The candidate should focus on providing more detailed and specific examples.",
        }
    }
}
