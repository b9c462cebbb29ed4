//! A small state machine over `printpdf` page operations.
//!
//! Tracks the open text section and the current font and fill color so the
//! emitted op stream only switches state when it actually changes. All
//! entry points take top-left page coordinates and convert to the PDF's
//! bottom-left origin internally.

use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::xobject::XObjectTransform;
use printpdf::{BuiltinFont, Pt, Rgb, XObjectId};

use quire_layout::fonts::Font;
use quire_types::Color;

/// Fraction of the font size between the top of a line box and its baseline.
const BASELINE_FACTOR: f32 = 0.8;

fn builtin(font: Font) -> BuiltinFont {
    match font {
        Font::Helvetica => BuiltinFont::Helvetica,
        Font::HelveticaBold => BuiltinFont::HelveticaBold,
    }
}

fn to_pdf_color(c: Color) -> printpdf::color::Color {
    printpdf::color::Color::Rgb(Rgb::new(
        c.r as f32 / 255.0,
        c.g as f32 / 255.0,
        c.b as f32 / 255.0,
        None,
    ))
}

pub(crate) struct PageOps {
    page_height: f32,
    ops: Vec<Op>,
    is_text_section_open: bool,
    current_font: Option<(Font, f32)>,
    current_fill: Option<Color>,
}

impl PageOps {
    pub(crate) fn new(page_height: f32) -> Self {
        Self {
            page_height,
            ops: Vec::new(),
            is_text_section_open: false,
            current_font: None,
            current_fill: None,
        }
    }

    pub(crate) fn into_ops(mut self) -> Vec<Op> {
        self.close_text_section_if_open();
        self.ops
    }

    fn close_text_section_if_open(&mut self) {
        if self.is_text_section_open {
            self.ops.push(Op::EndTextSection);
            self.is_text_section_open = false;
        }
    }

    fn set_fill(&mut self, color: Color) {
        if self.current_fill != Some(color) {
            self.ops.push(Op::SetFillColor {
                col: to_pdf_color(color),
            });
            self.current_fill = Some(color);
        }
    }

    /// Draws one line of text with its top edge at `y`.
    pub(crate) fn text(&mut self, content: &str, x: f32, y: f32, font: Font, size: f32, color: Color) {
        if content.is_empty() {
            return;
        }
        if !self.is_text_section_open {
            self.ops.push(Op::StartTextSection);
            self.is_text_section_open = true;
        }
        self.set_fill(color);
        if self.current_font != Some((font, size)) {
            self.ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(size),
                font: builtin(font),
            });
            self.current_font = Some((font, size));
        }

        let baseline_y = y + size * BASELINE_FACTOR;
        let pdf_y = self.page_height - baseline_y;
        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Pt(x), Pt(pdf_y)),
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(content.to_string())],
            font: builtin(font),
        });
    }

    /// Fills an axis-aligned rectangle given in top-left coordinates.
    pub(crate) fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.close_text_section_if_open();
        let pdf_y = self.page_height - (y + height);
        let polygon = Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    LinePoint { p: Point { x: Pt(x), y: Pt(pdf_y) }, bezier: false },
                    LinePoint { p: Point { x: Pt(x + width), y: Pt(pdf_y) }, bezier: false },
                    LinePoint { p: Point { x: Pt(x + width), y: Pt(pdf_y + height) }, bezier: false },
                    LinePoint { p: Point { x: Pt(x), y: Pt(pdf_y + height) }, bezier: false },
                ],
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::EvenOdd,
        };
        self.set_fill(color);
        self.ops.push(Op::DrawPolygon { polygon });
    }

    /// A horizontal rule drawn as a thin filled rectangle.
    pub(crate) fn hline(&mut self, x: f32, y: f32, width: f32, thickness: f32, color: Color) {
        self.fill_rect(x, y, width, thickness, color);
    }

    /// A vertical rule drawn as a thin filled rectangle.
    pub(crate) fn vline(&mut self, x: f32, y: f32, height: f32, thickness: f32, color: Color) {
        self.fill_rect(x, y, thickness, height, color);
    }

    /// Places a registered image XObject scaled to `width` x `height` points
    /// with its top-left corner at (`x`, `y`).
    pub(crate) fn image(
        &mut self,
        id: XObjectId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        px_w: u32,
        px_h: u32,
    ) {
        self.close_text_section_if_open();
        let pdf_y = self.page_height - (y + height);
        let transform = XObjectTransform {
            translate_x: Some(Pt(x)),
            translate_y: Some(Pt(pdf_y)),
            scale_x: Some(width / px_w as f32),
            scale_y: Some(height / px_h as f32),
            rotate: None,
            dpi: Some(72.0),
        };
        self.ops.push(Op::UseXobject { id, transform });
    }
}
