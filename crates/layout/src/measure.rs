//! Deterministic height measurement for every block kind.
//!
//! All heights are in points for a given content width. The renderer draws
//! from the same wrapping and row-height functions, so a measured height is
//! exactly the vertical space the drawn block consumes.

use std::io::Cursor;

use quire_blocks::{Block, BlockContent, ParagraphStyle};

use crate::fonts::{self, Font};
use crate::text;

pub const BODY_SIZE: f32 = 10.0;
pub const SMALL_SIZE: f32 = 8.5;
pub const H1_SIZE: f32 = 14.0;
pub const H2_SIZE: f32 = 12.0;

/// Vertical gap pagination inserts between consecutive blocks on a page.
pub const BLOCK_SPACING: f32 = 8.0;

/// Padding inside table cells, applied on every side.
pub const CELL_PAD: f32 = 4.0;
/// Fraction of the content width given to the label column of key/value rows.
pub const KV_LABEL_RATIO: f32 = 0.35;
pub const BULLET_INDENT: f32 = 12.0;
pub const GROUP_INDENT: f32 = 12.0;
/// Gap under a level-1 heading's underline rule.
pub const HEADING_RULE_GAP: f32 = 4.0;
/// Gap between an image or group title and the content below it.
pub const TITLE_GAP: f32 = 2.0;

/// Signature cards draw a fixed-size box regardless of content.
pub const SIGNATURE_CARD_HEIGHT: f32 = 102.0;

/// Face and size for a paragraph style.
pub fn paragraph_font(style: ParagraphStyle) -> (Font, f32) {
    match style {
        ParagraphStyle::Body => (Font::Helvetica, BODY_SIZE),
        ParagraphStyle::Small => (Font::Helvetica, SMALL_SIZE),
        ParagraphStyle::Emphasis => (Font::HelveticaBold, BODY_SIZE),
    }
}

/// Face and size for a heading level. Levels above 2 clamp to level 2.
pub fn heading_font(level: u8) -> (Font, f32) {
    if level <= 1 {
        (Font::HelveticaBold, H1_SIZE)
    } else {
        (Font::HelveticaBold, H2_SIZE)
    }
}

/// Measures the height `block` occupies at `width`, excluding inter-block
/// spacing. Total and deterministic: unknown images measure as 0.0 and are
/// skipped downstream rather than aborting the document.
pub fn block_height(block: &Block, width: f32) -> f32 {
    match &block.content {
        BlockContent::Heading { text, level } => heading_height(text, *level, width),
        BlockContent::Paragraph { text, style } => {
            let (font, size) = paragraph_font(*style);
            text::wrap(text, font, size, width).len() as f32 * fonts::line_height(size)
        }
        BlockContent::KeyValueRows { pairs } => pairs
            .iter()
            .map(|(label, value)| kv_row_height(label, value, width))
            .sum(),
        BlockContent::BulletList { items } => items
            .iter()
            .map(|item| bullet_item_height(item, width))
            .sum(),
        BlockContent::Table {
            title,
            headers,
            rows,
        } => table_height(title.as_deref(), headers, rows, width),
        BlockContent::Image { data, caption } => image_height(data, caption.as_deref(), width),
        BlockContent::SignatureCard { .. } => SIGNATURE_CARD_HEIGHT,
        BlockContent::Group { title, children } => group_height(title.as_deref(), children, width),
        BlockContent::Spacer { height } => height.max(0.0),
    }
}

pub fn heading_height(text: &str, level: u8, width: f32) -> f32 {
    let (font, size) = heading_font(level);
    let lines = text::wrap(text, font, size, width).len().max(1) as f32;
    let mut h = lines * fonts::line_height(size);
    if level <= 1 {
        h += HEADING_RULE_GAP;
    }
    h
}

/// Height of one label/value row: the taller of the two wrapped columns
/// plus cell padding.
pub fn kv_row_height(label: &str, value: &str, width: f32) -> f32 {
    let label_width = (width * KV_LABEL_RATIO - CELL_PAD).max(1.0);
    let value_width = (width * (1.0 - KV_LABEL_RATIO) - CELL_PAD).max(1.0);
    let label_lines = text::wrap(label, Font::HelveticaBold, BODY_SIZE, label_width).len();
    let value_lines = text::wrap(value, Font::Helvetica, BODY_SIZE, value_width).len();
    let lines = label_lines.max(value_lines).max(1) as f32;
    lines * fonts::line_height(BODY_SIZE) + CELL_PAD
}

pub fn bullet_item_height(item: &str, width: f32) -> f32 {
    let item_width = (width - BULLET_INDENT).max(1.0);
    let lines = text::wrap(item, Font::Helvetica, BODY_SIZE, item_width)
        .len()
        .max(1) as f32;
    lines * fonts::line_height(BODY_SIZE)
}

/// Splits `width` across table columns.
///
/// A few well-known header layouts get hand-tuned ratios; anything else
/// divides the width evenly.
pub fn table_column_widths(headers: &[String], width: f32) -> Vec<f32> {
    const KNOWN_LAYOUTS: &[(&[&str], &[f32])] = &[
        (&["item", "description", "result"], &[0.18, 0.57, 0.25]),
        (
            &["no", "finding", "severity", "action"],
            &[0.08, 0.44, 0.16, 0.32],
        ),
        (&["parameter", "value", "unit"], &[0.40, 0.38, 0.22]),
    ];

    if headers.is_empty() {
        return Vec::new();
    }
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| {
            h.trim()
                .trim_end_matches('.')
                .trim_start_matches('#')
                .to_ascii_lowercase()
        })
        .collect();
    for (signature, ratios) in KNOWN_LAYOUTS {
        if normalized.len() == signature.len()
            && normalized.iter().zip(signature.iter()).all(|(a, b)| a == b || a.is_empty())
        {
            return ratios.iter().map(|r| r * width).collect();
        }
    }
    let even = width / headers.len() as f32;
    vec![even; headers.len()]
}

/// Height of one table row given resolved column widths.
pub fn table_row_height(cells: &[String], col_widths: &[f32], bold: bool) -> f32 {
    let font = if bold { Font::HelveticaBold } else { Font::Helvetica };
    let mut lines = 1usize;
    for (i, cell) in cells.iter().enumerate() {
        let Some(col) = col_widths.get(i) else { break };
        let cell_width = (col - 2.0 * CELL_PAD).max(1.0);
        lines = lines.max(text::wrap(cell, font, SMALL_SIZE, cell_width).len());
    }
    lines as f32 * fonts::line_height(SMALL_SIZE) + 2.0 * CELL_PAD
}

pub fn table_title_height() -> f32 {
    fonts::line_height(BODY_SIZE) + TITLE_GAP
}

fn table_height(title: Option<&str>, headers: &[String], rows: &[Vec<String>], width: f32) -> f32 {
    let cols = table_column_widths(headers, width);
    let mut h = 0.0;
    if title.is_some() {
        h += table_title_height();
    }
    if !headers.is_empty() {
        h += table_row_height(headers, &cols, true);
    }
    for row in rows {
        h += table_row_height(row, &cols, false);
    }
    h
}

/// Natural pixel dimensions of an encoded image, read from its header.
pub fn image_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?;
    reader.into_dimensions().ok()
}

pub fn caption_height(caption: &str, width: f32) -> f32 {
    let lines = text::wrap(caption, Font::Helvetica, SMALL_SIZE, width)
        .len()
        .max(1) as f32;
    TITLE_GAP + lines * fonts::line_height(SMALL_SIZE)
}

fn image_height(data: &[u8], caption: Option<&str>, width: f32) -> f32 {
    let Some((px_w, px_h)) = image_dimensions(data) else {
        log::warn!("unreadable image ({} bytes); measuring as empty", data.len());
        return 0.0;
    };
    if px_w == 0 {
        return 0.0;
    }
    let mut h = px_h as f32 * (width / px_w as f32);
    if let Some(caption) = caption {
        h += caption_height(caption, width);
    }
    h
}

pub fn group_title_height() -> f32 {
    fonts::line_height(BODY_SIZE) + TITLE_GAP
}

fn group_height(title: Option<&str>, children: &[Block], width: f32) -> f32 {
    let child_width = (width - GROUP_INDENT).max(1.0);
    let mut h = 0.0;
    if title.is_some() {
        h += group_title_height();
    }
    let mut first = true;
    for child in children {
        if child.is_empty() {
            continue;
        }
        if !first {
            h += BLOCK_SPACING;
        }
        h += block_height(child, child_width);
        first = false;
    }
    h
}
