//! Upload tracker: admission rules plus per-file progress state machine

use super::aggregate::{
    validate_file, FileMeta, FileRejection, UploadStatus, UploadedFile, MAX_FILE_SIZE,
    WEB_CONTENT_MIME,
};
use serde::{Deserialize, Serialize};

/// Files the dropzone on the upload page accepts at once
pub const DROPZONE_MAX_FILES: usize = 5;
/// Files the inline chat uploader accepts at once
pub const CHAT_MAX_FILES: usize = 1;

/// Simulated upload tick, ms
pub const UPLOAD_TICK_MS: u32 = 200;
/// Upper bound of one simulated progress increment
pub const MAX_TICK_INCREMENT: f64 = 20.0;
/// Simulated processing time after the upload reached 100, ms
pub const PROCESSING_DELAY_MS: u32 = 2000;

/// Result of one admission round
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdmitReport {
    /// Ids of the files that entered the tracked set
    pub admitted: Vec<String>,
    pub rejected: Vec<FileRejection>,
}

impl AdmitReport {
    pub fn error_messages(&self) -> Vec<String> {
        self.rejected.iter().map(|r| r.to_string()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadTracker {
    files: Vec<UploadedFile>,
    max_files: usize,
    max_size: u64,
}

impl Default for UploadTracker {
    fn default() -> Self {
        Self::new(DROPZONE_MAX_FILES)
    }
}

impl UploadTracker {
    pub fn new(max_files: usize) -> Self {
        Self {
            files: Vec::new(),
            max_files,
            max_size: MAX_FILE_SIZE,
        }
    }

    pub fn dropzone() -> Self {
        Self::new(DROPZONE_MAX_FILES)
    }

    pub fn inline() -> Self {
        Self::new(CHAT_MAX_FILES)
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn get(&self, id: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn remaining_capacity(&self) -> usize {
        self.max_files.saturating_sub(self.files.len())
    }

    /// Whether any file is still uploading or processing
    pub fn is_busy(&self) -> bool {
        self.files.iter().any(|f| f.status.is_active())
    }

    /// Validate candidates and admit them in order until the cap is reached.
    ///
    /// Rejected candidates never enter the tracked set.
    pub fn admit(&mut self, candidates: Vec<FileMeta>) -> AdmitReport {
        let mut report = AdmitReport::default();
        for meta in candidates {
            if let Err(rejection) = validate_file(&meta, self.max_size) {
                report.rejected.push(rejection);
                continue;
            }
            if self.remaining_capacity() == 0 {
                report.rejected.push(FileRejection::CapacityExceeded {
                    name: meta.name,
                    max: self.max_files,
                });
                continue;
            }
            let file = UploadedFile::new(meta);
            report.admitted.push(file.id.clone());
            self.files.push(file);
        }
        report
    }

    /// Admit a web page reference from the "From URL" tab.
    ///
    /// Only the cap applies; the entry is named after the trimmed URL.
    pub fn admit_web_content(&mut self, url: &str) -> Result<String, FileRejection> {
        let url = url.trim();
        if self.remaining_capacity() == 0 {
            return Err(FileRejection::CapacityExceeded {
                name: url.to_string(),
                max: self.max_files,
            });
        }
        let file = UploadedFile::new(FileMeta::new(url, WEB_CONTENT_MIME, 0));
        let id = file.id.clone();
        self.files.push(file);
        Ok(id)
    }

    /// Apply one progress tick. `None` when the file is no longer tracked.
    pub fn advance(&mut self, id: &str, increment: f64) -> Option<UploadStatus> {
        self.file_mut(id).map(|f| f.advance(increment))
    }

    pub fn finish_processing(&mut self, id: &str) -> Option<UploadStatus> {
        self.file_mut(id).map(|f| f.finish_processing())
    }

    pub fn fail(&mut self, id: &str, reason: &str) -> Option<UploadStatus> {
        self.file_mut(id).map(|f| {
            f.fail(reason);
            f.status
        })
    }

    /// Immediate, status-independent removal
    pub fn remove(&mut self, id: &str) -> Option<UploadedFile> {
        let pos = self.files.iter().position(|f| f.id == id)?;
        Some(self.files.remove(pos))
    }

    /// Replace the whole set, keeping at most `max_files` entries
    pub fn replace(&mut self, mut files: Vec<UploadedFile>) {
        files.truncate(self.max_files);
        self.files = files;
    }

    fn file_mut(&mut self, id: &str) -> Option<&mut UploadedFile> {
        self.files.iter_mut().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> FileMeta {
        FileMeta::new(name, "application/pdf", 2 * 1024 * 1024)
    }

    #[test]
    fn test_pdf_is_admitted_uploading_at_zero() {
        let mut tracker = UploadTracker::dropzone();
        let report = tracker.admit(vec![pdf("a.pdf")]);

        assert_eq!(report.admitted.len(), 1);
        assert!(report.rejected.is_empty());
        let file = tracker.get(&report.admitted[0]).unwrap();
        assert_eq!(file.status, UploadStatus::Uploading);
        assert_eq!(file.progress, 0.0);
    }

    #[test]
    fn test_disallowed_type_never_tracked() {
        let mut tracker = UploadTracker::dropzone();
        let report = tracker.admit(vec![
            FileMeta::new("movie.mp4", "video/mp4", 100),
            FileMeta::new("huge.pdf", "application/pdf", MAX_FILE_SIZE + 1),
        ]);

        assert!(report.admitted.is_empty());
        assert_eq!(report.rejected.len(), 2);
        assert!(tracker.is_empty());
        assert_eq!(
            report.error_messages(),
            vec![
                "movie.mp4 is not a supported file type".to_string(),
                "huge.pdf is too large (max 10 MB)".to_string(),
            ]
        );
    }

    #[test]
    fn test_cap_rejects_overflow() {
        let mut tracker = UploadTracker::inline();
        let report = tracker.admit(vec![pdf("a.pdf"), pdf("b.pdf")]);
        assert_eq!(report.admitted.len(), 1);
        assert_eq!(
            report.rejected,
            vec![FileRejection::CapacityExceeded {
                name: "b.pdf".to_string(),
                max: 1
            }]
        );

        let mut dropzone = UploadTracker::dropzone();
        let names: Vec<_> = (0..7).map(|i| pdf(&format!("{i}.pdf"))).collect();
        let report = dropzone.admit(names);
        assert_eq!(report.admitted.len(), DROPZONE_MAX_FILES);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(dropzone.remaining_capacity(), 0);
    }

    #[test]
    fn test_progress_is_monotonic_and_ends_at_100() {
        let mut tracker = UploadTracker::dropzone();
        let id = tracker.admit(vec![pdf("a.pdf")]).admitted.remove(0);

        let increments = [3.5, 0.0, 19.9, 12.0, 20.0, 7.25, 18.0, 20.0, 20.0];
        let mut last = 0.0;
        let mut status = UploadStatus::Uploading;
        for inc in increments {
            status = tracker.advance(&id, inc).unwrap();
            let progress = tracker.get(&id).unwrap().progress;
            assert!(progress >= last);
            last = progress;
            if status != UploadStatus::Uploading {
                break;
            }
        }
        assert_eq!(status, UploadStatus::Processing);
        assert_eq!(tracker.get(&id).unwrap().progress, 100.0);
        assert_eq!(tracker.finish_processing(&id), Some(UploadStatus::Completed));
        assert!(!tracker.is_busy());
    }

    #[test]
    fn test_remove_is_unconditional() {
        let mut tracker = UploadTracker::dropzone();
        let ids = tracker.admit(vec![pdf("a.pdf"), pdf("b.pdf")]).admitted;
        tracker.advance(&ids[0], 100.0);

        assert!(tracker.remove(&ids[0]).is_some());
        assert!(tracker.remove(&ids[1]).is_some());
        assert!(tracker.remove(&ids[1]).is_none());
        assert_eq!(tracker.advance(&ids[1], 5.0), None);
    }

    #[test]
    fn test_web_content_entry() {
        let mut tracker = UploadTracker::new(1);
        let id = tracker
            .admit_web_content("  https://example.com/article ")
            .unwrap();
        let file = tracker.get(&id).unwrap();
        assert_eq!(file.file.name, "https://example.com/article");
        assert_eq!(file.kind_label(), "URL");
        assert!(tracker.admit_web_content("https://example.org").is_err());
    }

    #[test]
    fn test_replace_truncates_to_cap() {
        let mut source = UploadTracker::dropzone();
        source.admit(vec![pdf("a.pdf"), pdf("b.pdf")]);

        let mut inline = UploadTracker::inline();
        inline.replace(source.files().to_vec());
        assert_eq!(inline.len(), 1);
        assert_eq!(inline.files()[0].file.name, "a.pdf");
    }
}
