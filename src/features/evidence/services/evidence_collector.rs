use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use crate::features::evidence::models::{EvidenceFile, PreviewHandle, PreviewProvider};
use crate::features::evidence::services::camera::{
    encode_jpeg, CameraConstraints, CameraError, CameraProvider,
};

struct EvidenceItem {
    file: EvidenceFile,
    preview: PreviewHandle,
}

/// Ordered list of evidence files selected for one report
///
/// Owns one preview handle per file and releases each exactly once: on
/// removal, on `clear`, or when the collector is dropped.
pub struct EvidenceCollector {
    items: Vec<EvidenceItem>,
    previews: Arc<dyn PreviewProvider>,
    camera_constraints: CameraConstraints,
}

impl EvidenceCollector {
    pub fn new(previews: Arc<dyn PreviewProvider>) -> Self {
        Self {
            items: Vec::new(),
            previews,
            camera_constraints: CameraConstraints::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Files in selection order
    pub fn files(&self) -> impl Iterator<Item = &EvidenceFile> {
        self.items.iter().map(|item| &item.file)
    }

    pub fn preview(&self, index: usize) -> Option<&PreviewHandle> {
        self.items.get(index).map(|item| &item.preview)
    }

    /// Append the image and video files from `candidates`, dropping the rest
    ///
    /// Returns how many were accepted.
    pub fn add_files(&mut self, candidates: impl IntoIterator<Item = EvidenceFile>) -> usize {
        let before = self.items.len();

        for file in candidates {
            if !file.is_supported() {
                debug!(
                    "Skipping unsupported evidence '{}' ({})",
                    file.name, file.content_type
                );
                continue;
            }
            let preview = self.previews.create(&file);
            self.items.push(EvidenceItem { file, preview });
        }

        self.items.len() - before
    }

    /// Remove the file at `index`, releasing its preview
    pub fn remove_file(&mut self, index: usize) -> Option<EvidenceFile> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.previews.release(&item.preview);
        Some(item.file)
    }

    /// Grab one frame from `camera`, encode it as JPEG and append it
    pub async fn capture_from_camera(
        &mut self,
        camera: &dyn CameraProvider,
    ) -> Result<(), CameraError> {
        let frame = camera.grab_frame(&self.camera_constraints).await?;
        let jpeg = encode_jpeg(frame).await?;

        let name = format!("capture-{}.jpg", Utc::now().timestamp_millis());
        debug!("Captured camera frame '{}' ({} bytes)", name, jpeg.len());

        self.add_files([EvidenceFile::new(name, "image/jpeg", jpeg)]);
        Ok(())
    }

    /// Drop every file and release all previews
    pub fn clear(&mut self) {
        for item in self.items.drain(..) {
            self.previews.release(&item.preview);
        }
    }
}

impl Drop for EvidenceCollector {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::evidence::services::camera::RawFrame;
    use crate::shared::test_helpers::{RecordingPreviews, StaticCamera};

    fn image(name: &str) -> EvidenceFile {
        EvidenceFile::new(name, "image/jpeg", name.as_bytes().to_vec())
    }

    fn names(collector: &EvidenceCollector) -> Vec<String> {
        collector.files().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn test_add_files_filters_unsupported() {
        let previews = Arc::new(RecordingPreviews::default());
        let mut collector = EvidenceCollector::new(previews.clone());

        let accepted = collector.add_files(vec![
            image("a.jpg"),
            EvidenceFile::new("notes.txt", "text/plain", vec![1]),
            EvidenceFile::new("clip.mp4", "video/mp4", vec![2]),
            EvidenceFile::new("doc.pdf", "application/pdf", vec![3]),
        ]);

        assert_eq!(accepted, 2);
        assert_eq!(names(&collector), vec!["a.jpg", "clip.mp4"]);
        assert_eq!(previews.created_count(), 2);
    }

    #[test]
    fn test_add_files_appends_in_order() {
        let previews = Arc::new(RecordingPreviews::default());
        let mut collector = EvidenceCollector::new(previews);

        collector.add_files(vec![image("1.jpg"), image("2.jpg")]);
        collector.add_files(vec![image("3.jpg")]);

        assert_eq!(names(&collector), vec!["1.jpg", "2.jpg", "3.jpg"]);
    }

    #[test]
    fn test_remove_file_keeps_order_and_releases_once() {
        let previews = Arc::new(RecordingPreviews::default());
        let mut collector = EvidenceCollector::new(previews.clone());
        collector.add_files(vec![image("a.jpg"), image("b.jpg"), image("c.jpg")]);
        let removed_url = collector.preview(1).unwrap().url().to_string();

        let removed = collector.remove_file(1).unwrap();

        assert_eq!(removed.name, "b.jpg");
        assert_eq!(names(&collector), vec!["a.jpg", "c.jpg"]);
        assert_eq!(previews.release_count(&removed_url), 1);
        assert_eq!(previews.total_released(), 1);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let previews = Arc::new(RecordingPreviews::default());
        let mut collector = EvidenceCollector::new(previews.clone());
        collector.add_files(vec![image("a.jpg")]);

        assert!(collector.remove_file(5).is_none());
        assert_eq!(collector.len(), 1);
        assert_eq!(previews.total_released(), 0);
    }

    #[test]
    fn test_drop_releases_every_preview_once() {
        let previews = Arc::new(RecordingPreviews::default());
        {
            let mut collector = EvidenceCollector::new(previews.clone());
            collector.add_files(vec![image("a.jpg"), image("b.jpg"), image("c.jpg")]);
            collector.remove_file(0);
        }

        assert_eq!(previews.created_count(), 3);
        assert_eq!(previews.total_released(), 3);
        assert!(previews.all_released_once());
    }

    #[test]
    fn test_clear_then_drop_does_not_double_release() {
        let previews = Arc::new(RecordingPreviews::default());
        let mut collector = EvidenceCollector::new(previews.clone());
        collector.add_files(vec![image("a.jpg"), image("b.jpg")]);

        collector.clear();
        assert!(collector.is_empty());
        drop(collector);

        assert_eq!(previews.total_released(), 2);
        assert!(previews.all_released_once());
    }

    #[tokio::test]
    async fn test_capture_from_camera_appends_jpeg() {
        let previews = Arc::new(RecordingPreviews::default());
        let mut collector = EvidenceCollector::new(previews.clone());
        collector.add_files(vec![image("first.jpg")]);
        let camera = StaticCamera::new(RawFrame {
            width: 8,
            height: 8,
            pixels: vec![200; 8 * 8 * 3],
        });

        collector.capture_from_camera(&camera).await.unwrap();

        let captured = collector.files().last().unwrap();
        assert!(captured.name.starts_with("capture-"));
        assert!(captured.name.ends_with(".jpg"));
        assert_eq!(captured.content_type, "image/jpeg");
        assert_eq!(&captured.data[..2], &[0xFF, 0xD8]);
        assert_eq!(collector.len(), 2);
        assert_eq!(camera.requested(), Some(CameraConstraints::default()));
    }

    #[tokio::test]
    async fn test_camera_failure_leaves_list_untouched() {
        let previews = Arc::new(RecordingPreviews::default());
        let mut collector = EvidenceCollector::new(previews.clone());

        let result = collector
            .capture_from_camera(&StaticCamera::unavailable())
            .await;

        assert!(matches!(result, Err(CameraError::Unavailable(_))));
        assert!(collector.is_empty());
        assert_eq!(previews.created_count(), 0);
    }
}
