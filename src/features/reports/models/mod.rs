mod garbage_report;
mod report_draft;

pub use garbage_report::{GarbageLevel, GarbageReport, ReportStatus, WasteType};
pub use report_draft::ReportDraft;
