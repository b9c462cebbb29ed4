//! Synthetic image builders shared by the layout tests.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

pub fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

/// A mid-gray image with ink everywhere.
pub fn solid_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([100, 100, 100]));
    encode_png(&img)
}

/// Alternating bands of dark content and near-white gaps, 20 rows each.
/// Gives the break-row scan obvious low-ink seams to find.
pub fn striped_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |_, y| {
        if (y / 20) % 2 == 0 {
            Rgb([40, 40, 40])
        } else {
            Rgb([250, 250, 250])
        }
    });
    encode_png(&img)
}

/// Entirely near-white; carries no meaningful content.
pub fn blank_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([252, 252, 252]));
    encode_png(&img)
}

/// Near-white for the top `blank_rows` rows, dark content below.
pub fn bottom_heavy_png(width: u32, height: u32, blank_rows: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |_, y| {
        if y < blank_rows {
            Rgb([250, 250, 250])
        } else {
            Rgb([30, 30, 30])
        }
    });
    encode_png(&img)
}

/// Dark content only in the top `dark_rows` rows, near-white below.
pub fn top_heavy_png(width: u32, height: u32, dark_rows: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |_, y| {
        if y < dark_rows {
            Rgb([30, 30, 30])
        } else {
            Rgb([250, 250, 250])
        }
    });
    encode_png(&img)
}
