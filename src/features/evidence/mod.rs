//! Evidence capture: file selection, camera capture and preview handles

pub mod models;
pub mod services;

pub use models::{EvidenceFile, EvidenceKind, PreviewHandle, PreviewProvider, PreviewRegistry};
pub use services::{CameraProvider, EvidenceCollector};
