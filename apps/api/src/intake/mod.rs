// File intake: multipart form collection, résumé validation, and disk storage.
// Validation runs while the form is still being read, so a disallowed or
// oversized upload is rejected before any handler logic or database work.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::multipart::{Field, Multipart};
use bytes::Bytes;
use chrono::Utc;
use rand::Rng;
use tracing::warn;

use crate::errors::AppError;

/// Largest accepted résumé upload.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Multipart field name carrying the résumé document.
pub const RESUME_FIELD: &str = "resume";

/// URL prefix the upload directory is served under.
pub const UPLOADS_URL_PREFIX: &str = "uploads";

const ALLOWED_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// A validated document buffered in memory, not yet written to disk.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    data: Bytes,
    extension: String,
}

/// A document persisted under the upload directory.
///
/// `filename` is the generated name alone; `relative_path` prepends the
/// served URL prefix. Users store the former, applications the latter.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub filename: String,
    pub relative_path: String,
}

/// Handle to the upload directory. One per process, shared via `AppState`.
pub struct FileIntake {
    upload_dir: PathBuf,
}

impl FileIntake {
    /// Creates the upload directory if absent and returns a handle to it.
    pub async fn create(upload_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let upload_dir = upload_dir.into();
        tokio::fs::create_dir_all(&upload_dir).await?;
        Ok(Self { upload_dir })
    }

    /// Writes a validated document under a fresh generated name.
    ///
    /// The write happens outside any database transaction. Callers that go
    /// on to insert a row must call [`FileIntake::remove`] if the insert
    /// fails, or the file is orphaned.
    pub async fn store(&self, pending: &PendingUpload) -> Result<StoredUpload, AppError> {
        let filename = generate_name(&pending.extension);
        tokio::fs::write(self.upload_dir.join(&filename), &pending.data).await?;
        let relative_path = format!("{UPLOADS_URL_PREFIX}/{filename}");
        Ok(StoredUpload {
            filename,
            relative_path,
        })
    }

    /// Compensation arm of the write-then-insert pair: deletes a stored
    /// document after a failed insert. Best-effort; a leftover file is
    /// logged, never surfaced to the client.
    pub async fn remove(&self, stored: &StoredUpload) {
        let path = self.upload_dir.join(&stored.filename);
        if let Err(err) = tokio::fs::remove_file(&path).await {
            warn!(filename = %stored.filename, "failed to delete orphaned upload: {err}");
        }
    }
}

/// `<millisecond-timestamp>-<random-integer><original extension>`.
/// Unique with overwhelming probability; never checked for collisions.
fn generate_name(extension: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}{}", Utc::now().timestamp_millis(), suffix, extension)
}

/// Extension of the client-supplied filename, leading dot included.
/// Empty when the original name has none.
fn extension_of(file_name: &str) -> String {
    match Path::new(file_name).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!(".{ext}"),
        None => String::new(),
    }
}

fn check_document_type(content_type: Option<&str>) -> Result<(), AppError> {
    match content_type {
        Some(declared) if ALLOWED_MIME_TYPES.contains(&declared) => Ok(()),
        other => Err(AppError::UnsupportedFileType(
            other.unwrap_or("none declared").to_string(),
        )),
    }
}

fn append_chunk(data: &mut Vec<u8>, chunk: &[u8]) -> Result<(), AppError> {
    if data.len() + chunk.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::FileTooLarge);
    }
    data.extend_from_slice(chunk);
    Ok(())
}

/// Validates and buffers one uploaded document.
/// The declared MIME type is checked before any bytes are read; the size
/// cap is enforced per chunk so an oversized stream aborts early.
async fn receive_document(mut field: Field<'_>) -> Result<PendingUpload, AppError> {
    let content_type = field.content_type().map(str::to_string);
    check_document_type(content_type.as_deref())?;
    let extension = extension_of(field.file_name().unwrap_or(""));

    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        append_chunk(&mut data, &chunk)?;
    }

    Ok(PendingUpload {
        data: Bytes::from(data),
        extension,
    })
}

/// Text fields plus at most one validated résumé from a multipart form.
pub struct SubmittedForm {
    fields: HashMap<String, String>,
    pub resume: Option<PendingUpload>,
}

impl SubmittedForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&str, AppError> {
        require_field(self.text(name), name)
    }
}

/// Absent and empty values are both rejected.
pub fn require_field<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!(
            "Missing required field: {name}"
        ))),
    }
}

/// Walks a multipart form, collecting text fields and the résumé (if any).
/// A second résumé field replaces the first; only one document per request.
pub async fn collect_form(mut multipart: Multipart) -> Result<SubmittedForm, AppError> {
    let mut fields = HashMap::new();
    let mut resume = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        if name == RESUME_FIELD {
            resume = Some(receive_document(field).await?);
        } else {
            fields.insert(name, field.text().await?);
        }
    }

    Ok(SubmittedForm { fields, resume })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn pending(bytes: &[u8], extension: &str) -> PendingUpload {
        PendingUpload {
            data: Bytes::copy_from_slice(bytes),
            extension: extension.to_string(),
        }
    }

    #[test]
    fn accepts_pdf_and_both_word_types() {
        for declared in ALLOWED_MIME_TYPES {
            assert!(
                check_document_type(Some(declared)).is_ok(),
                "{declared} should be accepted"
            );
        }
    }

    #[test]
    fn rejects_other_and_missing_types() {
        assert!(check_document_type(Some("image/png")).is_err());
        assert!(check_document_type(Some("text/plain")).is_err());
        assert!(check_document_type(None).is_err());
    }

    #[test]
    fn size_cap_is_exact() {
        let mut data = Vec::new();
        assert!(append_chunk(&mut data, &vec![0u8; MAX_UPLOAD_BYTES]).is_ok());

        let mut data = vec![0u8; MAX_UPLOAD_BYTES];
        assert!(matches!(
            append_chunk(&mut data, &[0u8]),
            Err(AppError::FileTooLarge)
        ));
        // Rejected chunk must not be appended
        assert_eq!(data.len(), MAX_UPLOAD_BYTES);
    }

    #[test]
    fn extension_comes_from_original_name() {
        assert_eq!(extension_of("cv.pdf"), ".pdf");
        assert_eq!(extension_of("resume.final.docx"), ".docx");
        assert_eq!(extension_of("noextension"), "");
    }

    #[test]
    fn generated_names_differ_and_keep_extension() {
        let a = generate_name(".pdf");
        let b = generate_name(".pdf");
        assert_ne!(a, b);
        assert!(a.ends_with(".pdf"));
        assert!(a.contains('-'));
    }

    #[test]
    fn require_field_rejects_absent_and_empty() {
        assert!(require_field(None, "email").is_err());
        assert!(require_field(Some(""), "email").is_err());
        assert_eq!(require_field(Some("x@y.com"), "email").unwrap(), "x@y.com");
    }

    #[tokio::test]
    async fn store_writes_and_remove_deletes() {
        let dir = tempdir().unwrap();
        let intake = FileIntake::create(dir.path()).await.unwrap();

        let stored = intake.store(&pending(b"%PDF-1.4", ".pdf")).await.unwrap();
        let on_disk = dir.path().join(&stored.filename);
        assert!(on_disk.exists());
        assert_eq!(
            stored.relative_path,
            format!("{UPLOADS_URL_PREFIX}/{}", stored.filename)
        );
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"%PDF-1.4");

        intake.remove(&stored).await;
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn create_makes_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("content").join("uploads");
        FileIntake::create(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
