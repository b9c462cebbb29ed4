//! Measurement, content-aware image splitting, and pagination.
//!
//! The pipeline here is pure: blocks in, page buckets out. The same
//! measurement functions drive both the fit decisions in [`pagination`] and
//! the geometry the renderer draws with, which is what keeps measured and
//! rendered heights identical.

pub mod fonts;
pub mod measure;
pub mod pagination;
pub mod raster;
pub mod split;
pub mod text;

pub use pagination::{paginate, PageBucket};
pub use split::{split_block, SplitResult};

#[cfg(test)]
mod pagination_test;
#[cfg(test)]
mod test_utils;
