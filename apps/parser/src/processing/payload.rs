use std::io::Write;
use std::path::{Component, Path, PathBuf};

use base64::Engine;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text_blocking, DocumentFormat};
use crate::models::ids::RecordId;

/// Inbound body of `POST /process`. Every field is optional here so that missing fields
/// map to the service's own error codes rather than a generic deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub job_id: Option<RecordId>,
    pub candidate_id: Option<RecordId>,
    pub filename: Option<String>,
    pub file_data: Option<String>,
    pub text_data: Option<String>,
    /// Path of an already stored upload inside the upload directory, relative or absolute.
    pub file_path: Option<String>,
}

/// Where the resume text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    Text(String),
    Encoded(String),
    Stored(String),
}

#[derive(Debug)]
pub struct ValidatedRequest {
    pub job_id: RecordId,
    pub candidate_id: RecordId,
    pub filename: String,
    pub source: DocumentSource,
}

impl ProcessRequest {
    /// Checks required fields, then picks the payload: `textData`, then `fileData`,
    /// then `filePath`. Empty strings count as absent.
    pub fn validate(self) -> Result<ValidatedRequest, AppError> {
        let present = |id: Option<RecordId>| id.filter(|id| !id.is_blank());

        let (Some(job_id), Some(candidate_id), Some(filename)) = (
            present(self.job_id),
            present(self.candidate_id),
            non_empty(self.filename),
        ) else {
            return Err(AppError::MissingParameters(None));
        };

        let source = if let Some(text) = non_empty(self.text_data) {
            DocumentSource::Text(text)
        } else if let Some(data) = non_empty(self.file_data) {
            DocumentSource::Encoded(data)
        } else if let Some(path) = non_empty(self.file_path) {
            DocumentSource::Stored(path)
        } else {
            return Err(AppError::NoPayload);
        };

        Ok(ValidatedRequest {
            job_id,
            candidate_id,
            filename,
            source,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Turns the request payload into plain text.
///
/// Decoded uploads are spooled to a uniquely named temp file that is removed on drop,
/// whatever happens during extraction.
pub async fn resolve_text(
    source: DocumentSource,
    filename: &str,
    upload_dir: &Path,
) -> Result<String, AppError> {
    let format = DocumentFormat::from_filename(filename);

    match source {
        DocumentSource::Text(text) => {
            info!("Processing raw text input ({} chars)", text.chars().count());
            Ok(text)
        }
        DocumentSource::Encoded(data) => {
            let bytes = decode_base64(&data)?;
            let spooled = spool_to_temp_file(&bytes, format)?;
            let text = extract_text_blocking(spooled.path().to_path_buf(), format).await;
            drop(spooled);
            Ok(text)
        }
        DocumentSource::Stored(stored) => {
            let path = resolve_stored_path(upload_dir, &stored)?;
            if !path.is_file() {
                return Err(AppError::DecodeFailed(format!(
                    "stored file is not a regular file: {stored}"
                )));
            }
            Ok(extract_text_blocking(path, format).await)
        }
    }
}

/// Standard base64, ignoring embedded ASCII whitespace (line-wrapped payloads).
pub fn decode_base64(data: &str) -> Result<Vec<u8>, AppError> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| AppError::DecodeFailed(e.to_string()))
}

fn spool_to_temp_file(
    bytes: &[u8],
    format: DocumentFormat,
) -> Result<tempfile::NamedTempFile, AppError> {
    let mut file = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(format.suffix())
        .tempfile()
        .map_err(|e| AppError::DecodeFailed(format!("could not create temp file: {e}")))?;
    file.write_all(bytes)
        .and_then(|_| file.flush())
        .map_err(|e| AppError::DecodeFailed(format!("could not write temp file: {e}")))?;
    Ok(file)
}

/// Resolves a stored upload. Relative paths are taken from the upload directory; absolute
/// paths are accepted as sent by the backend. Either way the canonical path must lie
/// inside the canonical upload directory, and `..` components are refused outright.
pub fn resolve_stored_path(upload_dir: &Path, stored: &str) -> Result<PathBuf, AppError> {
    let requested = Path::new(stored);
    if requested
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(AppError::DecodeFailed(format!(
            "filePath must not contain '..': {stored}"
        )));
    }

    let root = upload_dir.canonicalize().map_err(|e| {
        AppError::DecodeFailed(format!(
            "upload directory {} is unavailable: {e}",
            upload_dir.display()
        ))
    })?;
    let path = upload_dir
        .join(requested)
        .canonicalize()
        .map_err(|_| AppError::DecodeFailed(format!("stored file not found: {stored}")))?;

    if !path.starts_with(&root) {
        return Err(AppError::DecodeFailed(format!(
            "filePath is outside the upload directory: {stored}"
        )));
    }

    Ok(path)
}
