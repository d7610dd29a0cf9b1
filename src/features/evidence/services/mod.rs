pub mod camera;
mod evidence_collector;

pub use camera::{CameraConstraints, CameraError, CameraFacing, CameraProvider, RawFrame};
pub use evidence_collector::EvidenceCollector;
