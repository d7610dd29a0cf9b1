//! In-memory fakes for the report capabilities

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::evidence::services::camera::{
    CameraConstraints, CameraError, CameraProvider, RawFrame,
};
use crate::features::evidence::{EvidenceFile, PreviewHandle, PreviewProvider};
use crate::features::geolocation::{
    GeoLocation, GeolocationError, LocationProvider, PositionOptions,
};
use crate::features::reports::models::GarbageReport;
use crate::features::reports::services::ReportRepository;
use crate::modules::storage::ObjectStore;

fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

// =============================================================================
// OBJECT STORE
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub path: String,
    pub data: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
struct StoreState {
    attempts: Vec<String>,
    objects: Vec<StoredObject>,
    deletes: Vec<String>,
}

/// Object store keeping uploads in memory
///
/// `fail_on_upload(k)` makes the k-th upload call (1-based) fail.
#[derive(Default)]
pub struct InMemoryObjectStore {
    state: Mutex<StoreState>,
    fail_on: Option<usize>,
    fail_deletes: bool,
}

#[allow(dead_code)]
impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on_upload(mut self, call: usize) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn fail_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    /// Objects currently stored, in upload order
    pub fn uploads(&self) -> Vec<StoredObject> {
        guard(&self.state).objects.clone()
    }

    pub fn uploaded_paths(&self) -> Vec<String> {
        guard(&self.state)
            .objects
            .iter()
            .map(|o| o.path.clone())
            .collect()
    }

    /// Every path passed to `upload`, including failed calls
    pub fn attempted_paths(&self) -> Vec<String> {
        guard(&self.state).attempts.clone()
    }

    /// Every path passed to `delete`
    pub fn deleted_paths(&self) -> Vec<String> {
        guard(&self.state).deletes.clone()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn upload(&self, path: &str, data: &[u8], content_type: &str) -> Result<()> {
        let mut state = guard(&self.state);
        state.attempts.push(path.to_string());

        if self.fail_on == Some(state.attempts.len()) {
            return Err(AppError::ExternalServiceError(format!(
                "upload of {} rejected",
                path
            )));
        }

        state.objects.push(StoredObject {
            path: path.to_string(),
            data: data.to_vec(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let mut state = guard(&self.state);
        state.deletes.push(path.to_string());

        if self.fail_deletes {
            return Err(AppError::ExternalServiceError(format!(
                "delete of {} rejected",
                path
            )));
        }

        state.objects.retain(|o| o.path != path);
        Ok(())
    }
}

// =============================================================================
// REPORT REPOSITORY
// =============================================================================

#[derive(Default)]
pub struct InMemoryReportRepository {
    saved: Mutex<Vec<GarbageReport>>,
    failure: Option<String>,
}

#[allow(dead_code)]
impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose every insert fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn saved(&self) -> Vec<GarbageReport> {
        guard(&self.saved).clone()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn insert(&self, report: &GarbageReport) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(AppError::Internal(message.clone()));
        }
        guard(&self.saved).push(report.clone());
        Ok(())
    }
}

// =============================================================================
// PREVIEWS
// =============================================================================

/// Preview provider counting creates and releases per handle
#[derive(Default)]
pub struct RecordingPreviews {
    created: Mutex<Vec<String>>,
    released: Mutex<HashMap<String, usize>>,
}

#[allow(dead_code)]
impl RecordingPreviews {
    pub fn created_count(&self) -> usize {
        guard(&self.created).len()
    }

    pub fn release_count(&self, url: &str) -> usize {
        guard(&self.released).get(url).copied().unwrap_or(0)
    }

    pub fn total_released(&self) -> usize {
        guard(&self.released).values().sum()
    }

    /// True when every created handle was released exactly once
    pub fn all_released_once(&self) -> bool {
        let created = guard(&self.created);
        let released = guard(&self.released);
        released.len() == created.len()
            && created
                .iter()
                .all(|url| released.get(url).copied() == Some(1))
    }
}

impl PreviewProvider for RecordingPreviews {
    fn create(&self, file: &EvidenceFile) -> PreviewHandle {
        let url = format!("test-preview://{}/{}", Uuid::new_v4(), file.name);
        guard(&self.created).push(url.clone());
        PreviewHandle::new(url)
    }

    fn release(&self, handle: &PreviewHandle) {
        *guard(&self.released)
            .entry(handle.url().to_string())
            .or_insert(0) += 1;
    }
}

// =============================================================================
// LOCATION
// =============================================================================

/// Location provider answering with a fixed result
pub struct FixedLocation {
    result: std::result::Result<GeoLocation, GeolocationError>,
    last_options: Mutex<Option<PositionOptions>>,
}

#[allow(dead_code)]
impl FixedLocation {
    pub fn ok(location: GeoLocation) -> Self {
        Self {
            result: Ok(location),
            last_options: Mutex::new(None),
        }
    }

    pub fn err(error: GeolocationError) -> Self {
        Self {
            result: Err(error),
            last_options: Mutex::new(None),
        }
    }

    pub fn last_options(&self) -> Option<PositionOptions> {
        *guard(&self.last_options)
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> std::result::Result<GeoLocation, GeolocationError> {
        *guard(&self.last_options) = Some(*options);
        self.result.clone()
    }
}

/// Location provider that never answers
pub struct NeverResolves;

#[async_trait]
impl LocationProvider for NeverResolves {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> std::result::Result<GeoLocation, GeolocationError> {
        std::future::pending().await
    }
}

// =============================================================================
// CAMERA
// =============================================================================

/// Camera returning one fixed frame, or always unavailable
pub struct StaticCamera {
    frame: Option<RawFrame>,
    requested: Mutex<Option<CameraConstraints>>,
}

#[allow(dead_code)]
impl StaticCamera {
    pub fn new(frame: RawFrame) -> Self {
        Self {
            frame: Some(frame),
            requested: Mutex::new(None),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            frame: None,
            requested: Mutex::new(None),
        }
    }

    pub fn requested(&self) -> Option<CameraConstraints> {
        *guard(&self.requested)
    }
}

#[async_trait]
impl CameraProvider for StaticCamera {
    async fn grab_frame(
        &self,
        constraints: &CameraConstraints,
    ) -> std::result::Result<RawFrame, CameraError> {
        *guard(&self.requested) = Some(*constraints);
        self.frame
            .clone()
            .ok_or_else(|| CameraError::Unavailable("no camera attached".to_string()))
    }
}
