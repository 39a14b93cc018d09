use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::validation::validate_mime_type;

/// Maximum accepted file size, bytes (10 MB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// MIME types accepted by the upload widgets
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "image/png",
    "image/jpeg",
    "image/jpg",
];

/// MIME type of entries added through the "From URL" tab
pub const WEB_CONTENT_MIME: &str = "text/html";

/// Metadata of a browser file handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// Lifecycle of a tracked upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploading,
    Processing,
    Completed,
    Error,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Uploading => "uploading",
            UploadStatus::Processing => "processing",
            UploadStatus::Completed => "completed",
            UploadStatus::Error => "error",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UploadStatus::Uploading => "Uploading",
            UploadStatus::Processing => "Processing...",
            UploadStatus::Completed => "Ready for analysis",
            UploadStatus::Error => "Failed",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, UploadStatus::Uploading | UploadStatus::Processing)
    }
}

/// Why a file was kept out of the tracked set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileRejection {
    #[error("{name} is not a supported file type")]
    UnsupportedType { name: String, mime_type: String },
    #[error("{name} is too large (max {})", size_limit(.limit))]
    TooLarge { name: String, size: u64, limit: u64 },
    #[error("{name} was not added: maximum {max} files")]
    CapacityExceeded { name: String, max: usize },
}

impl FileRejection {
    pub fn file_name(&self) -> &str {
        match self {
            FileRejection::UnsupportedType { name, .. }
            | FileRejection::TooLarge { name, .. }
            | FileRejection::CapacityExceeded { name, .. } => name,
        }
    }
}

/// Check type allow-list and size limit
pub fn validate_file(meta: &FileMeta, max_size: u64) -> Result<(), FileRejection> {
    if validate_mime_type(&meta.mime_type).is_err() {
        return Err(FileRejection::UnsupportedType {
            name: meta.name.clone(),
            mime_type: meta.mime_type.clone(),
        });
    }
    if meta.size > max_size {
        return Err(FileRejection::TooLarge {
            name: meta.name.clone(),
            size: meta.size,
            limit: max_size,
        });
    }
    Ok(())
}

fn size_limit(limit: &u64) -> String {
    format_file_size(*limit)
}

/// "1.5 MB"-style size string
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Random short identifier (9 lowercase alphanumerics)
pub fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..9].to_string()
}

/// File tracked by an upload widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    pub file: FileMeta,
    pub status: UploadStatus,
    /// 0..=100
    pub progress: f64,
    pub error: Option<String>,
}

impl UploadedFile {
    pub fn new(file: FileMeta) -> Self {
        Self {
            id: short_id(),
            file,
            status: UploadStatus::Uploading,
            progress: 0.0,
            error: None,
        }
    }

    /// Add `increment` to the progress while uploading.
    ///
    /// Reaching 100 clamps the progress and moves the file to `Processing`.
    /// Negative increments count as zero.
    pub fn advance(&mut self, increment: f64) -> UploadStatus {
        if self.status != UploadStatus::Uploading {
            return self.status;
        }
        let next = self.progress + increment.max(0.0);
        if next >= 100.0 {
            self.progress = 100.0;
            self.status = UploadStatus::Processing;
        } else {
            self.progress = next;
        }
        self.status
    }

    pub fn finish_processing(&mut self) -> UploadStatus {
        if self.status == UploadStatus::Processing {
            self.status = UploadStatus::Completed;
        }
        self.status
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        if self.status != UploadStatus::Error {
            self.status = UploadStatus::Error;
            self.error = Some(reason.into());
        }
    }

    /// Short type label shown in the upload list
    pub fn kind_label(&self) -> &'static str {
        let mime = self.file.mime_type.as_str();
        if mime == WEB_CONTENT_MIME {
            "URL"
        } else if mime.contains("pdf") {
            "PDF"
        } else if mime.contains("doc") {
            "DOC"
        } else if mime.starts_with("image/") {
            "IMG"
        } else {
            "TXT"
        }
    }

    pub fn progress_percent(&self) -> u8 {
        self.progress.round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(size: u64) -> FileMeta {
        FileMeta::new("notes.pdf", "application/pdf", size)
    }

    #[test]
    fn test_validate_file() {
        assert!(validate_file(&pdf(1024), MAX_FILE_SIZE).is_ok());
        assert!(validate_file(&pdf(MAX_FILE_SIZE), MAX_FILE_SIZE).is_ok());

        let err = validate_file(&pdf(MAX_FILE_SIZE + 1), MAX_FILE_SIZE).unwrap_err();
        assert_eq!(err.to_string(), "notes.pdf is too large (max 10 MB)");

        let exe = FileMeta::new("setup.exe", "application/x-msdownload", 10);
        let err = validate_file(&exe, MAX_FILE_SIZE).unwrap_err();
        assert_eq!(err.to_string(), "setup.exe is not a supported file type");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(MAX_FILE_SIZE), "10 MB");
    }

    #[test]
    fn test_short_id() {
        let id = short_id();
        assert_eq!(id.len(), 9);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(short_id(), short_id());
    }

    #[test]
    fn test_advance_clamps_and_moves_to_processing() {
        let mut file = UploadedFile::new(pdf(10));
        assert_eq!(file.advance(60.0), UploadStatus::Uploading);
        assert_eq!(file.advance(-5.0), UploadStatus::Uploading);
        assert_eq!(file.progress, 60.0);
        assert_eq!(file.advance(55.0), UploadStatus::Processing);
        assert_eq!(file.progress, 100.0);
        // no further movement outside of Uploading
        assert_eq!(file.advance(10.0), UploadStatus::Processing);
        assert_eq!(file.progress, 100.0);
        assert_eq!(file.finish_processing(), UploadStatus::Completed);
    }

    #[test]
    fn test_status_never_goes_back() {
        let mut file = UploadedFile::new(pdf(10));
        assert_eq!(file.finish_processing(), UploadStatus::Uploading);
        file.fail("network");
        assert_eq!(file.status, UploadStatus::Error);
        assert_eq!(file.advance(100.0), UploadStatus::Error);
        assert_eq!(file.finish_processing(), UploadStatus::Error);
        assert_eq!(file.error.as_deref(), Some("network"));
    }

    #[test]
    fn test_kind_label() {
        let label = |mime: &str| UploadedFile::new(FileMeta::new("f", mime, 1)).kind_label();
        assert_eq!(label("application/pdf"), "PDF");
        assert_eq!(
            label("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            "DOC"
        );
        assert_eq!(label("image/png"), "IMG");
        assert_eq!(label("text/plain"), "TXT");
        assert_eq!(label(WEB_CONTENT_MIME), "URL");
    }
}
