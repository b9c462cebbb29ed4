//! PDF rendering for paginated page buckets.
//!
//! The renderer draws exactly the geometry the layout crate measured: all
//! wrapping, row heights, and column widths come from `quire_layout`, so a
//! bucket that fit during pagination fits on the drawn page. Rendering is
//! infallible: undecodable images are skipped with a warning, and writing
//! the artifact to disk is the caller's concern.

mod draw;
mod ops;
mod renderer;

pub use renderer::{PdfDocumentRenderer, RenderOptions};
