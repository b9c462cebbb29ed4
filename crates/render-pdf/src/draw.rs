//! Per-kind block drawing.
//!
//! Every function here mirrors the corresponding measurement in
//! `quire_layout::measure`: identical wrapping, identical row heights,
//! identical indents. Drift between the two would make placed blocks
//! collide with the page chrome.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use printpdf::xobject::XObject;
use printpdf::{PdfDocument, XObjectId};

use quire_blocks::{Block, BlockContent, SharedData};
use quire_layout::fonts::{self, Font};
use quire_layout::{measure, text};
use quire_types::Color;

use crate::ops::PageOps;

/// Registered image XObjects, keyed by a hash of the raw bytes so repeated
/// slices of the same image embed once.
pub(crate) struct ImageRegistry<'a> {
    pub doc: &'a mut PdfDocument,
    pub cache: &'a mut HashMap<u64, (XObjectId, (u32, u32))>,
}

impl ImageRegistry<'_> {
    fn xobject_for(&mut self, data: &SharedData) -> Option<(XObjectId, (u32, u32))> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let key = hasher.finish();
        if let Some(cached) = self.cache.get(&key) {
            return Some(cached.clone());
        }

        let mut warnings = Vec::new();
        let raw = match printpdf::image::RawImage::decode_from_bytes(data, &mut warnings) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("skipping undecodable image in renderer: {err}");
                return None;
            }
        };
        let dims = (raw.width as u32, raw.height as u32);
        let id = XObjectId::new();
        self.doc
            .resources
            .xobjects
            .map
            .insert(id.clone(), XObject::Image(raw));
        self.cache.insert(key, (id.clone(), dims));
        Some((id, dims))
    }
}

/// Draws `block` with its top-left corner at (`x`, `y`). The caller
/// advances the cursor by `measure::block_height`.
pub(crate) fn draw_block(
    ops: &mut PageOps,
    images: &mut ImageRegistry<'_>,
    block: &Block,
    x: f32,
    y: f32,
    width: f32,
) {
    match &block.content {
        BlockContent::Heading { text, level } => draw_heading(ops, text, *level, x, y, width),
        BlockContent::Paragraph { text, style } => {
            let (font, size) = measure::paragraph_font(*style);
            let color = match style {
                quire_blocks::ParagraphStyle::Small => Color::DARK_GRAY,
                _ => Color::BLACK,
            };
            draw_wrapped(ops, text, x, y, width, font, size, color);
        }
        BlockContent::KeyValueRows { pairs } => draw_kv_rows(ops, pairs, x, y, width),
        BlockContent::BulletList { items } => draw_bullets(ops, items, x, y, width),
        BlockContent::Table {
            title,
            headers,
            rows,
        } => draw_table(ops, title.as_deref(), headers, rows, x, y, width),
        BlockContent::Image { data, caption } => {
            draw_image(ops, images, data, caption.as_deref(), x, y, width)
        }
        BlockContent::SignatureCard {
            title,
            name,
            date,
            image,
        } => draw_signature_card(ops, images, title, name, date.as_deref(), image, x, y, width),
        BlockContent::Group { title, children } => {
            draw_group(ops, images, title.as_deref(), children, x, y, width)
        }
        BlockContent::Spacer { .. } => {}
    }
}

/// Draws wrapped text and returns the height consumed.
fn draw_wrapped(
    ops: &mut PageOps,
    content: &str,
    x: f32,
    y: f32,
    width: f32,
    font: Font,
    size: f32,
    color: Color,
) -> f32 {
    let line_h = fonts::line_height(size);
    let mut cursor = y;
    for line in text::wrap(content, font, size, width) {
        ops.text(&line, x, cursor, font, size, color);
        cursor += line_h;
    }
    cursor - y
}

fn draw_heading(ops: &mut PageOps, content: &str, level: u8, x: f32, y: f32, width: f32) {
    let (font, size) = measure::heading_font(level);
    if level <= 1 {
        // Section headings render as a filled banner with reversed text.
        let text_h = text::wrap(content, font, size, width).len().max(1) as f32
            * fonts::line_height(size);
        ops.fill_rect(x, y, width, text_h + measure::HEADING_RULE_GAP - 1.0, Color::BANNER_BLUE);
        draw_wrapped(ops, content, x + 4.0, y + 2.0, width, font, size, Color::WHITE);
    } else {
        draw_wrapped(ops, content, x, y, width, font, size, Color::BANNER_BLUE);
    }
}

fn draw_kv_rows(ops: &mut PageOps, pairs: &[(String, String)], x: f32, y: f32, width: f32) {
    let label_width = (width * measure::KV_LABEL_RATIO - measure::CELL_PAD).max(1.0);
    let value_width = (width * (1.0 - measure::KV_LABEL_RATIO) - measure::CELL_PAD).max(1.0);
    let value_x = x + width * measure::KV_LABEL_RATIO;

    let mut cursor = y;
    for (label, value) in pairs {
        draw_wrapped(
            ops,
            label,
            x,
            cursor,
            label_width,
            Font::HelveticaBold,
            measure::BODY_SIZE,
            Color::DARK_GRAY,
        );
        draw_wrapped(
            ops,
            value,
            value_x,
            cursor,
            value_width,
            Font::Helvetica,
            measure::BODY_SIZE,
            Color::BLACK,
        );
        cursor += measure::kv_row_height(label, value, width);
    }
}

fn draw_bullets(ops: &mut PageOps, items: &[String], x: f32, y: f32, width: f32) {
    let item_x = x + measure::BULLET_INDENT;
    let item_width = (width - measure::BULLET_INDENT).max(1.0);
    let mut cursor = y;
    for item in items {
        ops.text(
            "\u{2022}",
            x,
            cursor,
            Font::Helvetica,
            measure::BODY_SIZE,
            Color::BLACK,
        );
        draw_wrapped(
            ops,
            item,
            item_x,
            cursor,
            item_width,
            Font::Helvetica,
            measure::BODY_SIZE,
            Color::BLACK,
        );
        cursor += measure::bullet_item_height(item, width);
    }
}

fn draw_table(
    ops: &mut PageOps,
    title: Option<&str>,
    headers: &[String],
    rows: &[Vec<String>],
    x: f32,
    y: f32,
    width: f32,
) {
    let cols = measure::table_column_widths(headers, width);
    let mut cursor = y;

    if let Some(title) = title {
        ops.text(
            title,
            x,
            cursor,
            Font::HelveticaBold,
            measure::BODY_SIZE,
            Color::BLACK,
        );
        cursor += measure::table_title_height();
    }

    if !headers.is_empty() {
        let header_h = measure::table_row_height(headers, &cols, true);
        ops.fill_rect(x, cursor, width, header_h, Color::BANNER_BLUE);
        draw_table_cells(ops, headers, &cols, x, cursor, true, Color::WHITE);
        cursor += header_h;
    }

    for row in rows {
        let row_h = measure::table_row_height(row, &cols, false);
        draw_table_cells(ops, row, &cols, x, cursor, false, Color::BLACK);
        ops.hline(x, cursor + row_h - 0.5, width, 0.5, Color::LIGHT_GRAY);
        cursor += row_h;
    }
}

fn draw_table_cells(
    ops: &mut PageOps,
    cells: &[String],
    cols: &[f32],
    x: f32,
    y: f32,
    bold: bool,
    color: Color,
) {
    let font = if bold { Font::HelveticaBold } else { Font::Helvetica };
    let mut cell_x = x;
    for (i, cell) in cells.iter().enumerate() {
        let Some(col) = cols.get(i) else { break };
        let cell_width = (col - 2.0 * measure::CELL_PAD).max(1.0);
        draw_wrapped(
            ops,
            cell,
            cell_x + measure::CELL_PAD,
            y + measure::CELL_PAD,
            cell_width,
            font,
            measure::SMALL_SIZE,
            color,
        );
        cell_x += col;
    }
}

fn draw_image(
    ops: &mut PageOps,
    images: &mut ImageRegistry<'_>,
    data: &SharedData,
    caption: Option<&str>,
    x: f32,
    y: f32,
    width: f32,
) {
    let Some((id, (px_w, px_h))) = images.xobject_for(data) else {
        return;
    };
    if px_w == 0 {
        return;
    }
    let height = px_h as f32 * (width / px_w as f32);
    ops.image(id, x, y, width, height, px_w, px_h);

    if let Some(caption) = caption {
        draw_wrapped(
            ops,
            caption,
            x,
            y + height + measure::TITLE_GAP,
            width,
            Font::Helvetica,
            measure::SMALL_SIZE,
            Color::MID_GRAY,
        );
    }
}

fn draw_signature_card(
    ops: &mut PageOps,
    images: &mut ImageRegistry<'_>,
    title: &str,
    name: &str,
    date: Option<&str>,
    image: &Option<SharedData>,
    x: f32,
    y: f32,
    width: f32,
) {
    const PAD: f32 = 8.0;
    let h = measure::SIGNATURE_CARD_HEIGHT;

    // Box outline.
    ops.hline(x, y, width, 0.75, Color::MID_GRAY);
    ops.hline(x, y + h - 0.75, width, 0.75, Color::MID_GRAY);
    ops.vline(x, y, h, 0.75, Color::MID_GRAY);
    ops.vline(x + width - 0.75, y, h, 0.75, Color::MID_GRAY);

    ops.text(
        title,
        x + PAD,
        y + PAD,
        Font::HelveticaBold,
        measure::SMALL_SIZE,
        Color::DARK_GRAY,
    );

    // Signature image sits between the title and the name rule.
    if let Some(data) = image {
        if let Some((id, (px_w, px_h))) = images.xobject_for(data) {
            if px_w > 0 && px_h > 0 {
                let sig_h = 38.0;
                let sig_w = (sig_h * px_w as f32 / px_h as f32).min(width - 2.0 * PAD);
                ops.image(id, x + PAD, y + 26.0, sig_w, sig_h, px_w, px_h);
            }
        }
    }

    let rule_y = y + h - 32.0;
    ops.hline(x + PAD, rule_y, width * 0.55, 0.75, Color::DARK_GRAY);
    ops.text(
        name,
        x + PAD,
        rule_y + 4.0,
        Font::Helvetica,
        measure::BODY_SIZE,
        Color::BLACK,
    );
    if let Some(date) = date {
        let date_w = fonts::text_width(date, Font::Helvetica, measure::BODY_SIZE);
        ops.text(
            date,
            x + width - PAD - date_w,
            rule_y + 4.0,
            Font::Helvetica,
            measure::BODY_SIZE,
            Color::BLACK,
        );
    }
}

fn draw_group(
    ops: &mut PageOps,
    images: &mut ImageRegistry<'_>,
    title: Option<&str>,
    children: &[Block],
    x: f32,
    y: f32,
    width: f32,
) {
    let child_x = x + measure::GROUP_INDENT;
    let child_width = (width - measure::GROUP_INDENT).max(1.0);
    let mut cursor = y;

    if let Some(title) = title {
        ops.text(
            title,
            x,
            cursor,
            Font::HelveticaBold,
            measure::BODY_SIZE,
            Color::BANNER_BLUE,
        );
        cursor += measure::group_title_height();
    }

    let children_top = cursor;
    let mut first = true;
    for child in children {
        if child.is_empty() {
            continue;
        }
        if !first {
            cursor += measure::BLOCK_SPACING;
        }
        draw_block(ops, images, child, child_x, cursor, child_width);
        cursor += measure::block_height(child, child_width);
        first = false;
    }

    // Left accent alongside the indented children.
    if cursor > children_top {
        ops.vline(x + 2.0, children_top, cursor - children_top, 1.0, Color::LIGHT_GRAY);
    }
}
