use std::collections::HashMap;

use chrono::{DateTime, Utc};
use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectId};

use quire_layout::fonts::{self, Font};
use quire_layout::{measure, PageBucket};
use quire_types::{Color, PageShell};

use crate::draw::{self, ImageRegistry};
use crate::ops::PageOps;

const FOOTER_SIZE: f32 = 8.0;
const HEADER_SIZE: f32 = 8.5;
const BANNER_TITLE_SIZE: f32 = 18.0;

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Timestamp stamped into the footer. `None` means the wall clock at
    /// render time; pass a fixed value to make repeated exports of the same
    /// document byte-comparable.
    pub generated_at: Option<DateTime<Utc>>,
}

/// Accumulates drawn pages and produces the final PDF bytes.
pub struct PdfDocumentRenderer {
    document: PdfDocument,
    shell: PageShell,
    title: String,
    reference: Option<String>,
    generated_at: DateTime<Utc>,
    image_xobjects: HashMap<u64, (XObjectId, (u32, u32))>,
}

impl PdfDocumentRenderer {
    pub fn new(
        title: impl Into<String>,
        reference: Option<String>,
        shell: PageShell,
        options: &RenderOptions,
    ) -> Self {
        let title = title.into();
        let document = PdfDocument::new(&title);
        Self {
            document,
            shell,
            title,
            reference,
            generated_at: options.generated_at.unwrap_or_else(Utc::now),
            image_xobjects: HashMap::new(),
        }
    }

    /// Draws every bucket as one page. An empty bucket list still produces
    /// a single page carrying the cover treatment, so the artifact is never
    /// a zero-page PDF.
    pub fn render_pages(&mut self, buckets: &[PageBucket]) {
        let total = buckets.len().max(1);
        for index in 0..total {
            let page = self.render_page(buckets.get(index), index + 1, total);
            self.document.pages.push(page);
        }
        log::info!("rendered {total} page(s) for \"{}\"", self.title);
    }

    fn render_page(&mut self, bucket: Option<&PageBucket>, number: usize, total: usize) -> PdfPage {
        let shell = self.shell;
        let mut ops = PageOps::new(shell.page_height);

        if number == 1 {
            self.draw_cover_banner(&mut ops);
        } else {
            self.draw_running_header(&mut ops);
        }
        self.draw_footer(&mut ops, number, total);

        if let Some(bucket) = bucket {
            let rect = shell.content_rect();
            let mut registry = ImageRegistry {
                doc: &mut self.document,
                cache: &mut self.image_xobjects,
            };
            let mut cursor = rect.y;
            for (i, block) in bucket.blocks.iter().enumerate() {
                if i > 0 {
                    cursor += measure::BLOCK_SPACING;
                }
                draw::draw_block(&mut ops, &mut registry, block, rect.x, cursor, rect.width);
                cursor += measure::block_height(block, rect.width);
            }
        }

        let width: Mm = Pt(shell.page_width).into();
        let height: Mm = Pt(shell.page_height).into();
        PdfPage::new(width, height, ops.into_ops())
    }

    /// Full-bleed band across the top of the first page with the document
    /// title and reference reversed out of it.
    fn draw_cover_banner(&self, ops: &mut PageOps) {
        let shell = &self.shell;
        let band_h = shell.margins.top + shell.header_band - 6.0;
        ops.fill_rect(0.0, 0.0, shell.page_width, band_h, Color::BANNER_BLUE);
        ops.text(
            &self.title,
            shell.margins.left,
            band_h - 46.0,
            Font::HelveticaBold,
            BANNER_TITLE_SIZE,
            Color::WHITE,
        );
        if let Some(reference) = &self.reference {
            ops.text(
                reference,
                shell.margins.left,
                band_h - 22.0,
                Font::Helvetica,
                HEADER_SIZE,
                Color::LIGHT_GRAY,
            );
        }
    }

    fn draw_running_header(&self, ops: &mut PageOps) {
        let shell = &self.shell;
        ops.text(
            &self.title,
            shell.margins.left,
            shell.margins.top,
            Font::HelveticaBold,
            HEADER_SIZE,
            Color::DARK_GRAY,
        );
        if let Some(reference) = &self.reference {
            let w = fonts::text_width(reference, Font::Helvetica, HEADER_SIZE);
            ops.text(
                reference,
                shell.page_width - shell.margins.right - w,
                shell.margins.top,
                Font::Helvetica,
                HEADER_SIZE,
                Color::DARK_GRAY,
            );
        }
        ops.hline(
            shell.margins.left,
            shell.margins.top + shell.header_band - 6.0,
            shell.content_width(),
            0.5,
            Color::LIGHT_GRAY,
        );
    }

    fn draw_footer(&self, ops: &mut PageOps, number: usize, total: usize) {
        let shell = &self.shell;
        let footer_top = shell.page_height - shell.margins.bottom - shell.footer_band;
        ops.hline(
            shell.margins.left,
            footer_top + 2.0,
            shell.content_width(),
            0.5,
            Color::LIGHT_GRAY,
        );

        let text_y = footer_top + 7.0;
        let stamp = format!(
            "Generated {}",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        );
        ops.text(
            &stamp,
            shell.margins.left,
            text_y,
            Font::Helvetica,
            FOOTER_SIZE,
            Color::MID_GRAY,
        );

        let page_label = format!("Page {number} of {total}");
        let w = fonts::text_width(&page_label, Font::Helvetica, FOOTER_SIZE);
        ops.text(
            &page_label,
            shell.page_width - shell.margins.right - w,
            text_y,
            Font::Helvetica,
            FOOTER_SIZE,
            Color::MID_GRAY,
        );
    }

    /// Serializes the document. Save warnings are demoted to debug logs;
    /// they do not affect the produced bytes.
    pub fn finalize(self) -> Vec<u8> {
        let mut warnings = Vec::new();
        let mut out = Vec::new();
        self.document
            .save_writer(&mut out, &PdfSaveOptions::default(), &mut warnings);
        for warning in warnings {
            log::debug!("pdf save warning: {warning:?}");
        }
        out
    }
}
