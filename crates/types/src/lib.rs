//! Foundation types shared by the layout and render crates.

pub mod color;
pub mod geometry;
pub mod page;

pub use color::Color;
pub use geometry::{Margins, Rect, Size};
pub use page::PageShell;
