//! PDF serialization of laid-out pages via `lopdf`.
//!
//! Uses the standard Type1 Helvetica fonts (no embedding) with WinAnsi encoding.
//! Text is passed through literal strings; `lopdf` escapes delimiters when writing.

use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::report::compose::REPORT_TITLE;
use crate::report::font_metrics::{win_ansi_byte, Font};
use crate::report::layout::{Color, LaidOutPage, PageConfig, Primitive};

/// Maps text to single-byte WinAnsi. Characters the encoding cannot hold become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(b'?'))
        .collect()
}

fn pt(v: f32) -> Object {
    Object::Integer(v.round() as i64)
}

fn name(n: &str) -> Object {
    Object::Name(n.as_bytes().to_vec())
}

fn color_operands(color: Color) -> Vec<Object> {
    match color {
        Color::Black => vec![Object::Real(0.0), Object::Real(0.0), Object::Real(0.0)],
        Color::Grey => vec![Object::Real(0.5), Object::Real(0.5), Object::Real(0.5)],
        Color::WhiteSmoke => vec![Object::Real(0.96), Object::Real(0.96), Object::Real(0.96)],
        Color::Beige => vec![Object::Real(0.96), Object::Real(0.96), Object::Real(0.86)],
    }
}

fn page_operations(page: &LaidOutPage) -> Vec<Operation> {
    let mut ops = Vec::new();
    for primitive in &page.primitives {
        match primitive {
            Primitive::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new("re", vec![pt(*x), pt(*y), pt(*width), pt(*height)]));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            Primitive::StrokeRect {
                x,
                y,
                width,
                height,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("RG", color_operands(Color::Black)));
                ops.push(Operation::new("w", vec![Object::Integer(1)]));
                ops.push(Operation::new("re", vec![pt(*x), pt(*y), pt(*width), pt(*height)]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            Primitive::Text {
                font,
                size_pt,
                x,
                y,
                color,
                text,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new("Tf", vec![name(font.resource_name()), pt(*size_pt)]));
                ops.push(Operation::new("Td", vec![pt(*x), pt(*y)]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }
    ops
}

fn add_font(doc: &mut Document, font: Font) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_name(),
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Writes `pages` as a complete PDF document and returns its bytes.
pub fn render_pdf(pages: &[LaidOutPage], config: &PageConfig) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = add_font(&mut doc, Font::Helvetica);
    let bold = add_font(&mut doc, Font::HelveticaBold);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Helvetica.resource_name() => regular,
            Font::HelveticaBold.resource_name() => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content.encode().context("Failed to encode page content stream")?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![pt(0.0), pt(0.0), pt(config.page_width_pt), pt(config.page_height_pt)],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(REPORT_TITLE),
        "Producer" => Object::string_literal(concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).context("Failed to serialize PDF")?;
    Ok(buffer)
}
