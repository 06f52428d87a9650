use std::panic;
use std::path::Path;

use super::{ExtractionError, ExtractionResult};

/// Per-page text joined by newlines. Pages without a text layer contribute an empty line.
pub(super) fn extract(path: &Path) -> ExtractionResult<String> {
    // pdf-extract panics on some malformed font tables instead of returning an error.
    let pages = panic::catch_unwind(|| pdf_extract::extract_text_by_pages(path))
        .map_err(|_| ExtractionError::Pdf("parser panicked".to_string()))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    Ok(pages.join("\n"))
}
