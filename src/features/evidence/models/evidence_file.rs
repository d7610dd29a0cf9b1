use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{FALLBACK_EXTENSION, MAX_EXTENSION_LEN};

/// Kind of evidence attached to a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Image,
    Video,
}

/// A photo or video offered as evidence, held in memory until submission
#[derive(Clone, PartialEq, Eq)]
pub struct EvidenceFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl EvidenceFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// `None` for anything that is not `image/*` or `video/*`
    pub fn kind(&self) -> Option<EvidenceKind> {
        let content_type = self.content_type.to_ascii_lowercase();
        if content_type.starts_with("image/") {
            Some(EvidenceKind::Image)
        } else if content_type.starts_with("video/") {
            Some(EvidenceKind::Video)
        } else {
            None
        }
    }

    pub fn is_supported(&self) -> bool {
        self.kind().is_some()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Extension used for the storage key
    ///
    /// Text after the last `.` of the original name when it is a short ASCII
    /// alphanumeric run; otherwise derived from the content type.
    pub fn extension(&self) -> String {
        match self.name.rsplit_once('.') {
            Some((_, ext)) if is_safe_extension(ext) => ext.to_string(),
            _ => extension_from_content_type(&self.content_type)
                .unwrap_or(FALLBACK_EXTENSION)
                .to_string(),
        }
    }
}

/// The extension ends up in the object key
fn is_safe_extension(ext: &str) -> bool {
    !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

// Raw bytes stay out of logs
impl std::fmt::Debug for EvidenceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvidenceFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Get file extension from content type
pub fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        "video/mp4" => Some("mp4"),
        "video/quicktime" => Some("mov"),
        "video/webm" => Some("webm"),
        "video/3gpp" => Some("3gp"),
        _ => None,
    }
}
