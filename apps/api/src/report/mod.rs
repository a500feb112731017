// Report builder: session snapshot → blocks → laid-out pages → PDF bytes.
// Rendering is CPU-bound; callers run `build_report` inside tokio::task::spawn_blocking.

pub mod assessment;
pub mod compose;
pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod pdf;

use anyhow::Result;

use crate::models::interview::Session;

pub use layout::{default_page_config, PageConfig};

/// Renders the full interview report for `session`.
pub fn build_report(session: &Session, config: &PageConfig) -> Result<Vec<u8>> {
    let document = compose::compose_report(session);
    let pages = layout::layout_document(&document, config);
    pdf::render_pdf(&pages, config)
}

pub fn report_filename(session_id: &str) -> String {
    format!("interview_report_{session_id}.pdf")
}
