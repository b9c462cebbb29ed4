use crate::geometry::{Margins, Rect};

/// A4 portrait in PostScript points.
pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Fixed page dimensions plus the bands reserved for per-page chrome.
///
/// The shell is a compile-time configuration: every page of a document shares
/// one shell, and the usable content rect is identical on every page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageShell {
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
    /// Reserved band below the top margin for the running header / cover banner.
    pub header_band: f32,
    /// Reserved band above the bottom margin for the footer.
    pub footer_band: f32,
}

impl PageShell {
    pub fn content_width(&self) -> f32 {
        (self.page_width - self.margins.horizontal()).max(0.0)
    }

    /// The height budget a page bucket may fill.
    pub fn content_height(&self) -> f32 {
        (self.page_height - self.margins.vertical() - self.header_band - self.footer_band).max(0.0)
    }

    /// The drawable content area, in top-left page coordinates.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.margins.left,
            self.margins.top + self.header_band,
            self.content_width(),
            self.content_height(),
        )
    }
}

impl Default for PageShell {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH_PT,
            page_height: A4_HEIGHT_PT,
            margins: Margins::uniform(40.0),
            header_band: 42.0,
            footer_band: 24.0,
        }
    }
}
