//! Simulated upload: random progress ticks, then a fixed processing delay.

use contracts::domain::a002_uploaded_file::tracker::{
    MAX_TICK_INCREMENT, PROCESSING_DELAY_MS, UPLOAD_TICK_MS,
};
use contracts::domain::a002_uploaded_file::{FileMeta, UploadStatus};
use gloo_timers::future::TimeoutFuture;

use crate::shared::task_registry::CancelHandle;

/// Map a uniform sample in `[0, 1)` to a progress increment
pub fn tick_increment(sample: f64) -> f64 {
    sample.clamp(0.0, 1.0) * MAX_TICK_INCREMENT
}

/// Drive `file_id` through uploading and processing.
///
/// `advance` and `finish` apply one step to whatever holds the file and
/// return its new status, or `None` once the file is gone.
pub async fn run_upload<A, F>(file_id: String, handle: CancelHandle, advance: A, finish: F)
where
    A: Fn(&str, f64) -> Option<UploadStatus>,
    F: Fn(&str) -> Option<UploadStatus>,
{
    loop {
        TimeoutFuture::new(UPLOAD_TICK_MS).await;
        if handle.is_cancelled() {
            return;
        }
        match advance(&file_id, tick_increment(js_sys::Math::random())) {
            Some(UploadStatus::Uploading) => continue,
            Some(UploadStatus::Processing) => break,
            _ => return,
        }
    }

    TimeoutFuture::new(PROCESSING_DELAY_MS).await;
    if handle.is_cancelled() {
        return;
    }
    if finish(&file_id) == Some(UploadStatus::Completed) {
        log::info!("File {file_id} processed");
    }
}

/// Read name, type and size of every file in a browser `FileList`
pub fn file_metas(list: &web_sys::FileList) -> Vec<FileMeta> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|file| FileMeta::new(file.name(), file.type_(), file.size() as u64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_increment_range() {
        assert_eq!(tick_increment(0.0), 0.0);
        assert_eq!(tick_increment(0.5), 10.0);
        assert!(tick_increment(0.999) < MAX_TICK_INCREMENT);
        assert_eq!(tick_increment(-1.0), 0.0);
    }
}
