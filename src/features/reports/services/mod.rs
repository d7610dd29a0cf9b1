mod report_repository;
mod submission_service;

pub use report_repository::{PgReportRepository, ReportRepository};
pub use submission_service::{evidence_path, ReportSubmissionService, SubmissionError};
