use std::collections::HashSet;
use std::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::features::evidence::models::EvidenceFile;

/// Opaque handle to a displayable preview of one evidence file
///
/// Not `Clone`: whoever owns the handle owns the obligation to release it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

/// Source of preview handles
///
/// Every handle returned by `create` must be passed to `release` exactly once.
pub trait PreviewProvider: Send + Sync {
    fn create(&self, file: &EvidenceFile) -> PreviewHandle;
    fn release(&self, handle: &PreviewHandle);
}

/// Registry of live preview handles
///
/// Records handles only. The evidence bytes stay with the `EvidenceFile`
/// that owns them.
#[derive(Default)]
pub struct PreviewRegistry {
    live: Mutex<HashSet<String>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self, handle: &PreviewHandle) -> bool {
        self.lock().contains(handle.url())
    }

    /// Number of handles not yet released
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.live.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PreviewProvider for PreviewRegistry {
    fn create(&self, file: &EvidenceFile) -> PreviewHandle {
        let url = format!("preview://{}", Uuid::new_v4());
        debug!("Preview {} created for {}", url, file.name);
        self.lock().insert(url.clone());
        PreviewHandle(url)
    }

    fn release(&self, handle: &PreviewHandle) {
        if !self.lock().remove(handle.url()) {
            warn!("Preview {} released more than once", handle.url());
        }
    }
}
