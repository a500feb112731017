//! Report layout — positions report blocks on fixed-size pages.
//!
//! Greedy word-wrap against the static font tables, top-down flow with a cursor,
//! and a page break whenever the next line (or the whole metrics table) would cross
//! the bottom margin. Coordinates are PDF points with the origin at the bottom-left.

use crate::report::compose::{ReportBlock, ReportDocument};
use crate::report::font_metrics::Font;

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Page geometry and type sizes for the report.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
    pub body_size_pt: f32,
    pub body_leading_pt: f32,
    pub heading_size_pt: f32,
    pub heading_leading_pt: f32,
    pub heading_space_before_pt: f32,
    pub heading_space_after_pt: f32,
    pub title_size_pt: f32,
    pub title_space_after_pt: f32,
    /// Metric / score column widths of the metrics table.
    pub table_col_widths_pt: [f32; 2],
    pub table_header_size_pt: f32,
    pub table_header_height_pt: f32,
    pub table_row_height_pt: f32,
}

impl PageConfig {
    pub fn text_width_pt(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_pt
    }
}

/// US letter (8.5" × 11"), 1" margins, 10pt body text.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_pt: 612.0,
        page_height_pt: 792.0,
        margin_pt: 72.0,
        body_size_pt: 10.0,
        body_leading_pt: 12.0,
        heading_size_pt: 14.0,
        heading_leading_pt: 17.0,
        heading_space_before_pt: 12.0,
        heading_space_after_pt: 6.0,
        title_size_pt: 24.0,
        title_space_after_pt: 30.0,
        table_col_widths_pt: [144.0, 72.0],
        table_header_size_pt: 14.0,
        table_header_height_pt: 30.0,
        table_row_height_pt: 18.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output primitives
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Grey,
    WhiteSmoke,
    Beige,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text {
        font: Font,
        size_pt: f32,
        x: f32,
        /// Baseline.
        y: f32,
        color: Color,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub primitives: Vec<Primitive>,
}

impl LaidOutPage {
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Word wrap
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word-wrap. The first line may be narrower than the rest (it shares its
/// row with a label). Words wider than a full line are split by character.
pub fn wrap_text(
    text: &str,
    font: Font,
    size_pt: f32,
    first_line_width: f32,
    line_width: f32,
) -> Vec<String> {
    let space_w = font.measure(" ", size_pt);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_w = 0.0_f32;

    let limit = |lines: &Vec<String>| {
        if lines.is_empty() {
            first_line_width
        } else {
            line_width
        }
    };

    for word in text.split_whitespace() {
        for piece in split_oversized(word, font, size_pt, line_width) {
            let piece_w = font.measure(&piece, size_pt);
            let gap = if current.is_empty() { 0.0 } else { space_w };

            if !current.is_empty() && current_w + gap + piece_w > limit(&lines) {
                lines.push(std::mem::take(&mut current));
                current_w = 0.0;
            } else if current.is_empty() && piece_w > limit(&lines) && lines.is_empty() {
                // Does not even fit after the label; start on a full-width line.
                lines.push(String::new());
            }

            if !current.is_empty() {
                current.push(' ');
                current_w += space_w;
            }
            current.push_str(&piece);
            current_w += piece_w;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_oversized(word: &str, font: Font, size_pt: f32, line_width: f32) -> Vec<String> {
    if font.measure(word, size_pt) <= line_width {
        return vec![word.to_string()];
    }
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        let mut candidate = piece.clone();
        candidate.push(c);
        if !piece.is_empty() && font.measure(&candidate, size_pt) > line_width {
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        } else {
            piece = candidate;
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

// ────────────────────────────────────────────────────────────────────────────
// Flow
// ────────────────────────────────────────────────────────────────────────────

struct Flow<'a> {
    config: &'a PageConfig,
    pages: Vec<LaidOutPage>,
    /// Top of the next line box.
    cursor: f32,
}

impl<'a> Flow<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            pages: vec![LaidOutPage::default()],
            cursor: config.page_height_pt - config.margin_pt,
        }
    }

    fn at_page_top(&self) -> bool {
        self.cursor >= self.config.page_height_pt - self.config.margin_pt
    }

    fn new_page(&mut self) {
        self.pages.push(LaidOutPage::default());
        self.cursor = self.config.page_height_pt - self.config.margin_pt;
    }

    /// Breaks the page if `height` does not fit above the bottom margin.
    fn reserve(&mut self, height: f32) {
        if self.cursor - height < self.config.margin_pt && !self.at_page_top() {
            self.new_page();
        }
    }

    fn skip(&mut self, gap: f32) {
        if !self.at_page_top() {
            self.cursor -= gap;
        }
    }

    fn push(&mut self, primitive: Primitive) {
        if let Some(page) = self.pages.last_mut() {
            page.primitives.push(primitive);
        }
    }

    /// Reserves one line box and returns its baseline.
    fn line(&mut self, size_pt: f32, leading_pt: f32) -> f32 {
        self.reserve(leading_pt);
        let baseline = self.cursor - size_pt;
        self.cursor -= leading_pt;
        baseline
    }

    fn text(&mut self, font: Font, size_pt: f32, x: f32, y: f32, color: Color, text: String) {
        self.push(Primitive::Text {
            font,
            size_pt,
            x,
            y,
            color,
            text,
        });
    }

    fn title(&mut self, text: &str) {
        let c = self.config;
        let width = Font::HelveticaBold.measure(text, c.title_size_pt);
        let x = ((c.page_width_pt - width) / 2.0).max(c.margin_pt);
        let y = self.line(c.title_size_pt, c.title_size_pt * 1.2);
        self.text(Font::HelveticaBold, c.title_size_pt, x, y, Color::Black, text.to_string());
        self.cursor -= c.title_space_after_pt;
    }

    fn heading(&mut self, text: &str) {
        let c = self.config;
        self.skip(c.heading_space_before_pt);
        // Keep the heading with at least one body line.
        self.reserve(c.heading_leading_pt + c.heading_space_after_pt + c.body_leading_pt);
        let y = self.line(c.heading_size_pt, c.heading_leading_pt);
        self.text(Font::HelveticaBold, c.heading_size_pt, c.margin_pt, y, Color::Black, text.to_string());
        self.cursor -= c.heading_space_after_pt;
    }

    fn field(&mut self, label: &str, value: &str) {
        let c = self.config;
        let size = c.body_size_pt;
        let indent = Font::HelveticaBold.measure(label, size) + Font::Helvetica.measure(" ", size);
        let width = c.text_width_pt();
        let lines = wrap_text(value, Font::Helvetica, size, width - indent, width);

        let y = self.line(size, c.body_leading_pt);
        self.text(Font::HelveticaBold, size, c.margin_pt, y, Color::Black, label.to_string());

        let mut lines = lines.into_iter();
        if let Some(first) = lines.next() {
            if !first.is_empty() {
                self.text(Font::Helvetica, size, c.margin_pt + indent, y, Color::Black, first);
            }
        }
        for line in lines {
            let y = self.line(size, c.body_leading_pt);
            self.text(Font::Helvetica, size, c.margin_pt, y, Color::Black, line);
        }
    }

    fn paragraph(&mut self, text: &str) {
        let c = self.config;
        let width = c.text_width_pt();
        for line in wrap_text(text, Font::Helvetica, c.body_size_pt, width, width) {
            let y = self.line(c.body_size_pt, c.body_leading_pt);
            self.text(Font::Helvetica, c.body_size_pt, c.margin_pt, y, Color::Black, line);
        }
    }

    /// Tables are never split across pages.
    fn table(&mut self, header: &[String; 2], rows: &[[String; 2]]) {
        let c = self.config;
        let [w0, w1] = c.table_col_widths_pt;
        let table_width = w0 + w1;
        let total_height = c.table_header_height_pt + c.table_row_height_pt * rows.len() as f32;
        self.reserve(total_height);

        let x0 = c.margin_pt + ((c.text_width_pt() - table_width) / 2.0).max(0.0);
        let col_x = [x0, x0 + w0];
        let col_w = [w0, w1];

        let mut top = self.cursor;
        let mut draw_row = |flow: &mut Self, cells: &[String; 2], header_row: bool| {
            let (height, size, font, bg, fg) = if header_row {
                (c.table_header_height_pt, c.table_header_size_pt, Font::HelveticaBold, Color::Grey, Color::WhiteSmoke)
            } else {
                (c.table_row_height_pt, c.body_size_pt, Font::Helvetica, Color::Beige, Color::Black)
            };
            let bottom = top - height;
            for col in 0..2 {
                flow.push(Primitive::FillRect {
                    x: col_x[col],
                    y: bottom,
                    width: col_w[col],
                    height,
                    color: bg,
                });
                flow.push(Primitive::StrokeRect {
                    x: col_x[col],
                    y: bottom,
                    width: col_w[col],
                    height,
                });
                let text_w = font.measure(&cells[col], size);
                let x = col_x[col] + (col_w[col] - text_w) / 2.0;
                // Header keeps extra padding below the text.
                let pad_bottom = if header_row { 12.0 } else { (height - size) / 2.0 + 1.0 };
                flow.text(font, size, x, bottom + pad_bottom, fg, cells[col].clone());
            }
            top = bottom;
        };

        draw_row(self, header, true);
        for row in rows {
            draw_row(self, row, false);
        }
        self.cursor -= total_height;
    }
}

/// Lays out every block of `doc`. Always returns at least one page.
pub fn layout_document(doc: &ReportDocument, config: &PageConfig) -> Vec<LaidOutPage> {
    let mut flow = Flow::new(config);
    for block in &doc.blocks {
        match block {
            ReportBlock::Title(text) => flow.title(text),
            ReportBlock::Field { label, value } => flow.field(label, value),
            ReportBlock::Heading(text) => flow.heading(text),
            ReportBlock::Table { header, rows } => flow.table(header, rows),
            ReportBlock::Spacer(gap) => flow.skip(f32::from(*gap)),
            ReportBlock::Paragraph(text) => flow.paragraph(text),
        }
    }
    flow.pages
}
