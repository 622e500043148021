//! Profile book loader: flattens a PDF into one searchable string.

use std::path::Path;

use tracing::debug;

use crate::errors::AppError;

/// Raw text of the profile book. Page boundaries survive only as the newline
/// appended after each page.
#[derive(Debug, Clone, Default)]
pub struct DocumentCorpus {
    pub text: String,
    pub page_count: usize,
}

/// Reads the PDF at `path` and concatenates the text of every page.
/// Any read or parse failure is returned as-is; there is no partial fallback.
pub fn load_document(path: &Path) -> Result<DocumentCorpus, AppError> {
    let bytes = std::fs::read(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let pdf_err = |message: String| AppError::Pdf {
        path: path.to_path_buf(),
        message,
    };
    let extracted = pdf_extract::extract_text_from_mem_by_pages(&bytes);
    let pages = extracted.map_err(|e| pdf_err(e.to_string()))?;

    debug!("Extracted {} pages from {}", pages.len(), path.display());

    Ok(DocumentCorpus {
        page_count: pages.len(),
        text: join_pages(&pages[..]),
    })
}

/// Each page is followed by a newline, including the last one.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let capacity = pages.iter().map(|p| p.as_ref().len() + 1).sum();
    let mut text = String::with_capacity(capacity);
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    text
}
