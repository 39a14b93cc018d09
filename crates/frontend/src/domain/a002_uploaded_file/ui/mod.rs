//! Upload widgets
//!
//! - file_upload.rs: drag-and-drop zone reading browser files into `FileMeta`
//! - file_list.rs: tracked files with progress, status and remove
//! - simulation.rs: timer loop driving a file through its upload states
//! - upload_page.rs: standalone upload page (files and "From URL")

pub mod file_list;
pub mod file_upload;
pub mod simulation;
pub mod upload_page;

pub use file_list::UploadedFileList;
pub use file_upload::{FileDropzone, RejectionList};
pub use upload_page::UploadPage;
