use std::path::PathBuf;

use thiserror::Error;

/// Application-level error type.
/// Everything here is fatal when raised during loading; the writer's errors are
/// reported by the caller and otherwise ignored.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract text from PDF {}: {message}", path.display())]
    Pdf { path: PathBuf, message: String },

    #[error("Failed to load spreadsheet {}: {message}", path.display())]
    SpreadsheetRead { path: PathBuf, message: String },

    #[error("Failed to write spreadsheet {}: {message}", path.display())]
    SpreadsheetWrite { path: PathBuf, message: String },

    #[error("Spreadsheet {} has no worksheets", path.display())]
    NoWorksheet { path: PathBuf },

    #[error("Column '{column}' not found in the header row of {}", path.display())]
    MissingColumn { path: PathBuf, column: String },
}
