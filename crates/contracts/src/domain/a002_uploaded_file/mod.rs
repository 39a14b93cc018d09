pub mod aggregate;
pub mod tracker;

pub use aggregate::{FileMeta, FileRejection, UploadStatus, UploadedFile};
pub use tracker::{AdmitReport, UploadTracker};
