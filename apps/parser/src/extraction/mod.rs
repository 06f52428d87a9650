//! Text extraction: turns an uploaded document into best-effort plain text.
//!
//! Every failure is swallowed here and degrades to an empty string.
//! Nothing downstream can tell a corrupt upload from an empty one.

mod docx;
mod legacy;
mod pdf;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("DOCX archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("DOCX XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    /// Legacy Word `.doc`. In practice these uploads are often RTF saved with a `.doc` name.
    LegacyDoc,
    PlainText,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "doc" => Self::LegacyDoc,
            _ => Self::PlainText,
        }
    }

    /// Sniffs the format from a filename. Anything unrecognised is plain text.
    pub fn from_filename(filename: &str) -> Self {
        Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::PlainText)
    }

    /// Extension including the leading dot, used when spooling uploads to disk.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
            Self::LegacyDoc => ".doc",
            Self::PlainText => ".txt",
        }
    }
}

/// Extracts text from `path`. Never fails: errors are logged and yield `""`.
pub fn extract_text(path: &Path, format: DocumentFormat) -> String {
    match try_extract(path, format) {
        Ok(text) => text,
        Err(e) => {
            warn!("Text extraction failed for {} ({format:?}): {e}", path.display());
            String::new()
        }
    }
}

/// Runs [`extract_text`] on the blocking pool.
/// A panic inside a parser surfaces as a join error and degrades like any other failure.
pub async fn extract_text_blocking(path: PathBuf, format: DocumentFormat) -> String {
    match tokio::task::spawn_blocking(move || extract_text(&path, format)).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Text extraction task aborted ({format:?}): {e}");
            String::new()
        }
    }
}

fn try_extract(path: &Path, format: DocumentFormat) -> ExtractionResult<String> {
    match format {
        DocumentFormat::Pdf => pdf::extract(path),
        DocumentFormat::Docx => docx::extract(path),
        DocumentFormat::LegacyDoc => legacy::extract(path),
        DocumentFormat::PlainText => Ok(decode_lossy(&std::fs::read(path)?)),
    }
}

/// Decodes UTF-8, dropping invalid byte sequences rather than substituting them.
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect()
}

/// The first `limit` characters of `text` (not bytes, so multi-byte text is never split).
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
