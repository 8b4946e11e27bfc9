//! Errors raised before any comparison starts

use std::path::{Path, PathBuf};

use sheet_parity_xlsx::XlsxError;
use thiserror::Error;

/// Result type for opening documents
pub type OpenResult<T> = std::result::Result<T, OpenError>;

/// A document could not be opened; no report is produced
#[derive(Debug, Error)]
pub enum OpenError {
    /// The file is missing, unreadable or not a valid package
    #[error("cannot open '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// The extension is not one the reader handles
    #[error("unsupported file format: '{}' (expected .xlsx or .xlsm)", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The document has no worksheet to analyse
    #[error("'{}' has no worksheet to analyse", path.display())]
    EmptyWorkbook { path: PathBuf },
}

impl OpenError {
    /// The offending document
    pub fn path(&self) -> &Path {
        match self {
            OpenError::Read { path, .. }
            | OpenError::UnsupportedFormat { path }
            | OpenError::EmptyWorkbook { path } => path,
        }
    }
}
