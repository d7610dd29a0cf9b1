mod evidence_file;
mod preview;

pub use evidence_file::{extension_from_content_type, EvidenceFile, EvidenceKind};
pub use preview::{PreviewHandle, PreviewProvider, PreviewRegistry};
