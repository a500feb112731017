//! The fixed, ordered list of interview prompts shared by every session.

use std::path::Path;

use anyhow::{bail, Context, Result};

const DEFAULT_QUESTIONS: [&str; 3] = [
    "Can you walk me through your experience with the technologies mentioned in your resume?",
    "Describe a challenging project you worked on and how you overcame obstacles.",
    "How do you handle working in a team environment with different personalities?",
];

/// Read-only prompt list. Sessions take an owned copy via [`QuestionBank::snapshot`].
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<String>,
}

impl QuestionBank {
    /// Builds a bank from custom prompts. An empty bank is rejected: a session
    /// must always have a first question to hand out.
    pub fn new(questions: Vec<String>) -> Result<Self> {
        if questions.is_empty() {
            bail!("question bank must contain at least one prompt");
        }
        Ok(Self { questions })
    }

    /// Loads prompts from a text file, one per line. Blank lines are skipped.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read question bank {}", path.display()))?;
        Self::new(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn first(&self) -> &str {
        &self.questions[0]
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.questions.clone()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self {
            questions: DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_bank_has_three_prompts() {
        let bank = QuestionBank::default();
        assert_eq!(bank.len(), 3);
        assert!(bank.first().starts_with("Can you walk me through"));
    }

    #[test]
    fn test_empty_bank_rejected() {
        assert!(QuestionBank::new(vec![]).is_err());
    }

    #[test]
    fn test_from_file_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "First prompt?\n\n  Second prompt?  \n").unwrap();
        let bank = QuestionBank::from_file(file.path()).unwrap();

        assert_eq!(bank.len(), 2);
        assert_eq!(bank.snapshot(), vec!["First prompt?", "Second prompt?"]);
    }

    #[test]
    fn test_from_file_missing_path_errors() {
        assert!(QuestionBank::from_file(Path::new("/nonexistent/questions.txt")).is_err());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let bank = QuestionBank::default();
        let mut copy = bank.snapshot();
        copy[0] = "mutated".to_string();
        copy.push("extra".to_string());
        assert_eq!(bank.len(), 3);
        assert_ne!(bank.first(), "mutated");
    }
}
