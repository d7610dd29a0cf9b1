/// Root folder for evidence inside the bucket (`reports/<report_id>/<file_id>.<ext>`)
pub const EVIDENCE_ROOT: &str = "reports";

/// Extension used when neither the file name nor the content type gives one
pub const FALLBACK_EXTENSION: &str = "bin";

/// Longest file-name extension kept in an object key
pub const MAX_EXTENSION_LEN: usize = 8;

// =============================================================================
// USER-FACING MESSAGES
// =============================================================================

pub const MSG_MISSING_EVIDENCE: &str = "Please capture or upload at least one photo or video";

pub const MSG_MISSING_LOCATION: &str = "Please enable location to continue";

pub const MSG_REPORT_SUBMITTED: &str = "Report submitted successfully!";
