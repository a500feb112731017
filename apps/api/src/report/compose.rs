//! Report composition — turns a session snapshot into an ordered list of blocks.
//!
//! Pure and deterministic; layout and PDF encoding happen downstream.

use crate::models::interview::Session;
use crate::report::assessment::Assessment;

pub const REPORT_TITLE: &str = "AI Interview Report";

#[derive(Debug, Clone, PartialEq)]
pub enum ReportBlock {
    /// Centered document heading.
    Title(String),
    /// Bold label followed by regular text on the same line.
    Field { label: String, value: String },
    /// Section heading.
    Heading(String),
    Table {
        header: [String; 2],
        rows: Vec<[String; 2]>,
    },
    /// Vertical gap in points.
    Spacer(u16),
    Paragraph(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub blocks: Vec<ReportBlock>,
}

fn field(label: impl Into<String>, value: impl Into<String>) -> ReportBlock {
    ReportBlock::Field {
        label: label.into(),
        value: value.into(),
    }
}

pub fn compose_report(session: &Session) -> ReportDocument {
    let metrics = &session.metrics;
    let mut blocks = vec![
        ReportBlock::Title(REPORT_TITLE.to_string()),
        ReportBlock::Spacer(20),
        field("Job Role:", session.job_role.as_str()),
        field("Resume:", session.resume_filename.as_str()),
        field("Interview Date:", session.interview_date()),
        ReportBlock::Spacer(20),
        ReportBlock::Heading("Performance Metrics:".to_string()),
        ReportBlock::Table {
            header: ["Metric".to_string(), "Score".to_string()],
            rows: vec![
                ["Attention".to_string(), format!("{}%", metrics.attention)],
                ["Positivity".to_string(), format!("{}%", metrics.positivity)],
                ["Confidence".to_string(), format!("{}%", metrics.confidence)],
            ],
        },
        ReportBlock::Spacer(20),
        ReportBlock::Heading("Interview Questions & Answers:".to_string()),
    ];

    for (i, record) in session.answers.iter().enumerate() {
        blocks.push(field(format!("Question {}:", i + 1), record.question.as_str()));
        blocks.push(field("Answer:", record.answer.as_str()));
        blocks.push(ReportBlock::Spacer(12));
    }

    blocks.push(ReportBlock::Heading("Overall Assessment:".to_string()));
    blocks.push(ReportBlock::Paragraph(
        Assessment::for_metrics(metrics).sentence().to_string(),
    ));

    ReportDocument { blocks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::questions::QuestionBank;
    use crate::models::interview::{Metrics, NewSession};
    use chrono::Utc;

    fn session_with_answers(answers: &[&str], m: Metrics) -> Session {
        let mut session = Session::create(
            "session_report".to_string(),
            NewSession {
                job_role: Some("Backend Engineer".to_string()),
                resume_filename: None,
            },
            &QuestionBank::default(),
            m,
            Utc::now(),
        );
        for a in answers {
            session.submit(a.to_string(), m, Utc::now()).unwrap();
        }
        session
    }

    fn qa_pairs(doc: &ReportDocument) -> Vec<(String, String)> {
        let fields: Vec<(&str, &str)> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                ReportBlock::Field { label, value } => Some((label.as_str(), value.as_str())),
                _ => None,
            })
            .collect();
        fields
            .windows(2)
            .filter(|w| w[0].0.starts_with("Question ") && w[1].0 == "Answer:")
            .map(|w| (w[0].1.to_string(), w[1].1.to_string()))
            .collect()
    }

    const GOOD: Metrics = Metrics {
        attention: 82,
        positivity: 85,
        confidence: 80,
    };

    #[test]
    fn test_one_pair_per_answer_in_order() {
        let session = session_with_answers(&["one", "two", "three"], GOOD);
        let pairs = qa_pairs(&compose_report(&session));
        assert_eq!(pairs.len(), 3);
        for (i, (question, answer)) in pairs.iter().enumerate() {
            assert_eq!(question, &session.questions[i]);
            assert_eq!(answer, &session.answers[i].answer);
        }
    }

    #[test]
    fn test_partial_session_reports_only_recorded_answers() {
        let session = session_with_answers(&["just one"], GOOD);
        assert_eq!(qa_pairs(&compose_report(&session)).len(), 1);

        let empty = session_with_answers(&[], GOOD);
        assert!(qa_pairs(&compose_report(&empty)).is_empty());
    }

    #[test]
    fn test_metrics_table_shape() {
        let session = session_with_answers(&[], GOOD);
        let doc = compose_report(&session);
        let (header, rows) = doc
            .blocks
            .iter()
            .find_map(|b| match b {
                ReportBlock::Table { header, rows } => Some((header, rows)),
                _ => None,
            })
            .unwrap();
        assert_eq!(header, &["Metric".to_string(), "Score".to_string()]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], ["Attention".to_string(), "82%".to_string()]);
        assert_eq!(rows[2][1], "80%");
    }

    #[test]
    fn test_identity_fields_and_assessment() {
        let session = session_with_answers(&[], GOOD);
        let doc = compose_report(&session);

        assert_eq!(doc.blocks[0], ReportBlock::Title(REPORT_TITLE.to_string()));
        assert!(doc.blocks.contains(&field("Job Role:", "Backend Engineer")));
        assert!(doc.blocks.contains(&field("Resume:", "No file uploaded")));
        assert!(doc
            .blocks
            .contains(&field("Interview Date:", session.interview_date())));
        assert_eq!(
            doc.blocks.last(),
            Some(&ReportBlock::Paragraph(Assessment::Good.sentence().to_string()))
        );
    }
}
