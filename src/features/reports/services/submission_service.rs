use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::ValidationErrors;

use crate::core::error::AppError;
use crate::features::evidence::EvidenceFile;
use crate::features::reports::models::{GarbageReport, ReportDraft, ReportStatus};
use crate::features::reports::services::ReportRepository;
use crate::modules::storage::ObjectStore;
use crate::shared::constants::{EVIDENCE_ROOT, MSG_MISSING_EVIDENCE, MSG_MISSING_LOCATION};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Invalid report fields: {0}")]
    InvalidFields(ValidationErrors),

    #[error("{}", MSG_MISSING_EVIDENCE)]
    MissingEvidence,

    #[error("{}", MSG_MISSING_LOCATION)]
    MissingLocation,

    #[error("Failed to upload file: {message}")]
    Upload { path: String, message: String },

    #[error("Failed to save report: {message}")]
    Save { message: String },
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::InvalidFields(errors) => AppError::InvalidFields(errors),
            SubmissionError::MissingEvidence | SubmissionError::MissingLocation => {
                AppError::Validation(err.to_string())
            }
            SubmissionError::Upload { .. } | SubmissionError::Save { .. } => {
                AppError::ExternalServiceError(err.to_string())
            }
        }
    }
}

/// Storage path of one evidence file: `reports/<report_id>/<file_id>.<ext>`
pub fn evidence_path(report_id: Uuid, file: &EvidenceFile) -> String {
    format!(
        "{}/{}/{}.{}",
        EVIDENCE_ROOT,
        report_id,
        Uuid::new_v4(),
        file.extension()
    )
}

/// Turns a complete draft into a stored report
pub struct ReportSubmissionService {
    object_store: Arc<dyn ObjectStore>,
    repository: Arc<dyn ReportRepository>,
}

impl ReportSubmissionService {
    pub fn new(object_store: Arc<dyn ObjectStore>, repository: Arc<dyn ReportRepository>) -> Self {
        Self {
            object_store,
            repository,
        }
    }

    /// Validate the draft, upload its evidence in order, then insert the row
    ///
    /// Nothing is sent to a backend unless every precondition holds. If an
    /// upload or the insert fails, files already uploaded for this attempt
    /// are deleted and the draft is left untouched. On success the draft is
    /// reset.
    pub async fn submit(&self, draft: &mut ReportDraft) -> Result<GarbageReport, SubmissionError> {
        let fields = draft
            .fields
            .to_fields()
            .map_err(SubmissionError::InvalidFields)?;

        if draft.evidence().is_empty() {
            return Err(SubmissionError::MissingEvidence);
        }

        let location = draft.location().ok_or(SubmissionError::MissingLocation)?;

        let report_id = Uuid::new_v4();
        let mut media_paths: Vec<String> = Vec::with_capacity(draft.evidence().len());

        for file in draft.evidence().files() {
            let path = evidence_path(report_id, file);

            if let Err(e) = self
                .object_store
                .upload(&path, &file.data, &file.content_type)
                .await
            {
                warn!("Upload of '{}' failed for report {}: {}", path, report_id, e);
                self.discard_uploads(&media_paths).await;
                return Err(SubmissionError::Upload {
                    path,
                    message: e.to_string(),
                });
            }

            debug!("Uploaded evidence '{}' ({} bytes)", path, file.size());
            media_paths.push(path);
        }

        let report = GarbageReport {
            id: report_id,
            garbage_level: fields.garbage_level,
            waste_types: fields.waste_types,
            remarks: fields.remarks.unwrap_or_default(),
            location,
            media_paths,
            created_at: Utc::now(),
            status: ReportStatus::Pending,
        };

        if let Err(e) = self.repository.insert(&report).await {
            warn!("Saving report {} failed: {}", report_id, e);
            self.discard_uploads(&report.media_paths).await;
            return Err(SubmissionError::Save {
                message: e.to_string(),
            });
        }

        info!(
            "Report submitted: id={}, level={}, files={}",
            report.id,
            report.garbage_level,
            report.media_paths.len()
        );

        draft.reset();
        Ok(report)
    }

    /// Best-effort removal of objects uploaded by a failed attempt
    async fn discard_uploads(&self, paths: &[String]) {
        for path in paths {
            if let Err(e) = self.object_store.delete(path).await {
                warn!("Could not delete orphaned evidence '{}': {}", path, e);
            }
        }
    }
}
