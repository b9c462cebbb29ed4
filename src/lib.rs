//! quire: a paginated document layout engine.
//!
//! A typed block tree goes in; a multi-page PDF comes out. The pipeline is
//! build tree -> measure -> paginate -> render -> write, run synchronously
//! on the calling thread. Concurrent exports are independent by
//! construction: measurement is pure and every call owns its own tree and
//! page shell.

mod error;
mod export;

pub use error::ExportError;
pub use export::{export_document, render_document, ExportOptions};

pub use quire_blocks::{
    flatten, Block, BlockContent, Document, ParagraphStyle, Section, SharedData,
};
pub use quire_layout::{paginate, PageBucket};
pub use quire_types::{Margins, PageShell};
