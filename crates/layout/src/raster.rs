//! Pixel analysis behind content-aware image splitting.
//!
//! Break rows are chosen on a downsampled grayscale thumbnail, then mapped
//! back to full resolution, so the scan cost is bounded regardless of the
//! source image size.

use image::{DynamicImage, GrayImage, ImageFormat};
use std::io::Cursor;

/// Thumbnail bounds for the ink scan.
pub const MAX_SAMPLE_WIDTH: u32 = 128;
pub const MAX_SAMPLE_HEIGHT: u32 = 1024;

/// Pixels at or above this luma count as background.
pub const INK_LUMA_CEILING: u8 = 245;

/// Minimum fraction of inked pixels for a slice to be worth keeping.
pub const MEANINGFUL_INK_RATIO: f32 = 0.006;

/// Decodes raw PNG/JPEG bytes, warning instead of failing on bad data.
pub fn decode(data: &[u8]) -> Option<DynamicImage> {
    match image::load_from_memory(data) {
        Ok(img) => Some(img),
        Err(err) => {
            log::warn!("image decode failed ({} bytes): {err}", data.len());
            None
        }
    }
}

fn sample_luma(img: &DynamicImage) -> GrayImage {
    let (w, h) = (img.width(), img.height());
    if w <= MAX_SAMPLE_WIDTH && h <= MAX_SAMPLE_HEIGHT {
        img.to_luma8()
    } else {
        img.thumbnail(MAX_SAMPLE_WIDTH, MAX_SAMPLE_HEIGHT).to_luma8()
    }
}

fn row_ink_ratio(luma: &GrayImage, y: u32) -> f32 {
    let width = luma.width();
    if width == 0 {
        return 0.0;
    }
    let inked = (0..width)
        .filter(|&x| luma.get_pixel(x, y).0[0] < INK_LUMA_CEILING)
        .count();
    inked as f32 / width as f32
}

fn total_ink_ratio(luma: &GrayImage) -> f32 {
    let total = (luma.width() * luma.height()) as f32;
    if total == 0.0 {
        return 0.0;
    }
    let inked = luma.pixels().filter(|p| p.0[0] < INK_LUMA_CEILING).count();
    inked as f32 / total
}

/// True when the image carries enough ink to be worth placing on a page.
pub fn has_meaningful_content(img: &DynamicImage) -> bool {
    total_ink_ratio(&sample_luma(img)) >= MEANINGFUL_INK_RATIO
}

/// Picks the full-resolution row to cut at, at or above `target_row`.
///
/// The scan window reaches back up to an eighth of the image from the
/// target and takes the row with the least ink, so cuts land in gaps
/// between photographed content instead of through it. The returned row is
/// always in `1..img.height()`, keeping both slices non-degenerate.
pub fn find_break_row(img: &DynamicImage, target_row: u32) -> u32 {
    let height = img.height();
    if height <= 1 {
        return 1;
    }
    let target_row = target_row.clamp(1, height - 1);

    let luma = sample_luma(img);
    let sample_h = luma.height();
    let scale = sample_h as f32 / height as f32;
    let target_s = ((target_row as f32 * scale) as u32).clamp(1, sample_h - 1);

    let radius = (sample_h / 8).max(4);
    let window_start = target_s.saturating_sub(radius).max(1);

    let mut best_row = target_s;
    let mut best_ink = f32::MAX;
    // Scan toward the target so a tie keeps the cut as low (late) as
    // possible, wasting the least page space.
    for y in window_start..=target_s {
        let ink = row_ink_ratio(&luma, y);
        if ink <= best_ink {
            best_ink = ink;
            best_row = y;
        }
    }

    ((best_row as f32 / scale) as u32).clamp(1, height - 1)
}

fn encode_slice(slice: DynamicImage) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    match slice.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png) {
        Ok(()) => Some(buf),
        Err(err) => {
            log::warn!("failed to re-encode image slice: {err}");
            None
        }
    }
}

/// Cuts `img` horizontally at `row` and returns the PNG-encoded halves.
/// A half with no meaningful content comes back as `None` and is dropped
/// by the caller instead of occupying page space.
pub fn split_at_row(img: &DynamicImage, row: u32) -> (Option<Vec<u8>>, Option<Vec<u8>>) {
    let height = img.height();
    let row = row.clamp(1, height.saturating_sub(1).max(1));

    let top = img.crop_imm(0, 0, img.width(), row);
    let bottom = img.crop_imm(0, row, img.width(), height - row);

    let top_out = has_meaningful_content(&top)
        .then(|| encode_slice(top))
        .flatten();
    let bottom_out = has_meaningful_content(&bottom)
        .then(|| encode_slice(bottom))
        .flatten();
    (top_out, bottom_out)
}
