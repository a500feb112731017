//! Interview state machine: `AwaitingAnswer(i)` for each prompt, then `Complete`.
//!
//! Each accepted answer records `{question, answer, timestamp}`, moves the cursor
//! forward by one and replaces the metrics wholesale. Submitting to a completed
//! session is rejected and leaves it untouched.

use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::interview::questions::QuestionBank;
use crate::models::interview::{
    AnswerRecord, Metrics, NewSession, Session, DEFAULT_JOB_ROLE, NO_RESUME,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewState {
    AwaitingAnswer(usize),
    Complete,
}

/// What a successful submit leads to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    NextQuestion {
        question: String,
        /// 1-based position of `question` in the session's list.
        question_number: usize,
    },
    Complete,
}

impl Session {
    /// Opens a session in `AwaitingAnswer(0)` with freshly sampled metrics.
    pub fn create(
        session_id: String,
        new: NewSession,
        bank: &QuestionBank,
        metrics: Metrics,
        now: DateTime<Utc>,
    ) -> Self {
        let job_role = new
            .job_role
            .filter(|role| !role.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_JOB_ROLE.to_string());
        let resume_filename = new
            .resume_filename
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| NO_RESUME.to_string());

        Session {
            session_id,
            job_role,
            resume_filename,
            start_time: now,
            last_activity: now,
            questions: bank.snapshot(),
            answers: Vec::new(),
            current_question: 0,
            metrics,
        }
    }

    pub fn state(&self) -> InterviewState {
        if self.current_question >= self.questions.len() {
            InterviewState::Complete
        } else {
            InterviewState::AwaitingAnswer(self.current_question)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == InterviewState::Complete
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// The prompt awaiting an answer, if any.
    pub fn current_prompt(&self) -> Option<&str> {
        match self.state() {
            InterviewState::AwaitingAnswer(i) => Some(self.questions[i].as_str()),
            InterviewState::Complete => None,
        }
    }

    /// Calendar date of the interview, `YYYY-MM-DD`.
    pub fn interview_date(&self) -> String {
        self.start_time.format("%Y-%m-%d").to_string()
    }

    pub fn submit(
        &mut self,
        answer: String,
        metrics: Metrics,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, AppError> {
        let index = match self.state() {
            InterviewState::AwaitingAnswer(i) => i,
            InterviewState::Complete => {
                return Err(AppError::InterviewComplete(self.session_id.clone()))
            }
        };

        self.answers.push(AnswerRecord {
            question: self.questions[index].clone(),
            answer,
            timestamp: now,
        });
        self.current_question = index + 1;
        self.metrics = metrics;
        self.last_activity = now;

        Ok(match self.current_prompt() {
            Some(next) => SubmitOutcome::NextQuestion {
                question: next.to_string(),
                question_number: self.current_question + 1,
            },
            None => SubmitOutcome::Complete,
        })
    }
}
