//! The export pipeline: block tree in, PDF artifact on disk out.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use quire_blocks::{flatten, Document};
use quire_layout::paginate;
use quire_render_pdf::{PdfDocumentRenderer, RenderOptions};
use quire_types::PageShell;

use crate::error::ExportError;

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub shell: PageShell,
    /// Fixed footer timestamp; `None` stamps the current time.
    pub generated_at: Option<DateTime<Utc>>,
}

/// Renders `document` to PDF bytes without touching the filesystem.
pub fn render_document(document: &Document, options: &ExportOptions) -> Vec<u8> {
    let blocks = flatten(document);
    let block_count = blocks.len();
    let buckets = paginate(blocks, &options.shell);
    log::debug!(
        "\"{}\": {block_count} blocks paginated into {} page(s)",
        document.title,
        buckets.len(),
    );

    let render_options = RenderOptions {
        generated_at: options.generated_at,
    };
    let mut renderer = PdfDocumentRenderer::new(
        document.title.clone(),
        document.reference.clone(),
        options.shell,
        &render_options,
    );
    renderer.render_pages(&buckets);
    renderer.finalize()
}

/// Exports `document` to `dest`, returning the written path.
///
/// The artifact is staged in a temp file beside the destination and moved
/// into place only after every byte is flushed, so a crash or full disk
/// never leaves a truncated PDF at `dest`.
pub fn export_document(
    document: &Document,
    dest: &Path,
    options: &ExportOptions,
) -> Result<PathBuf, ExportError> {
    let bytes = render_document(document, options);

    let dest_dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dest_dir)?;

    let mut staged = NamedTempFile::new_in(&dest_dir)?;
    staged.write_all(&bytes)?;
    staged.flush()?;
    staged.persist(dest)?;

    log::info!("exported \"{}\" to {}", document.title, dest.display());
    Ok(dest.to_path_buf())
}
