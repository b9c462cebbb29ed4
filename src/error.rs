use thiserror::Error;

/// Terminal failure of a document export.
///
/// There is no partial-success mode: either a complete artifact lands at
/// the destination path, or nothing does.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tempfile::PersistError> for ExportError {
    fn from(err: tempfile::PersistError) -> Self {
        ExportError::Io(err.error)
    }
}
