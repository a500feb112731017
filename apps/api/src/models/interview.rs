use chrono::{DateTime, Utc};
use serde::Serialize;

/// Synthetic performance scores, each an integer percentage in [70, 95].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub attention: u8,
    pub positivity: u8,
    pub confidence: u8,
}

impl Metrics {
    pub fn mean(&self) -> f64 {
        (f64::from(self.attention) + f64::from(self.positivity) + f64::from(self.confidence)) / 3.0
    }
}

/// One accepted answer, paired with the prompt it answered.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

/// A single interview attempt held in memory.
///
/// `questions` is an owned copy of the bank taken at creation, so sessions never
/// observe each other's lists. `answers.len() == current_question` always holds.
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: String,
    pub job_role: String,
    pub resume_filename: String,
    pub start_time: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub questions: Vec<String>,
    pub answers: Vec<AnswerRecord>,
    pub current_question: usize,
    pub metrics: Metrics,
}

/// Caller-supplied identity for a new session. Stored verbatim.
#[derive(Debug, Clone, Default)]
pub struct NewSession {
    pub job_role: Option<String>,
    pub resume_filename: Option<String>,
}

pub const DEFAULT_JOB_ROLE: &str = "Unknown Role";
pub const NO_RESUME: &str = "No file uploaded";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_equal_scores() {
        let m = Metrics {
            attention: 80,
            positivity: 80,
            confidence: 80,
        };
        assert!((m.mean() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mean_is_not_truncated() {
        let m = Metrics {
            attention: 90,
            positivity: 90,
            confidence: 89,
        };
        assert!(m.mean() < 90.0);
        assert!(m.mean() > 89.6);
    }
}
