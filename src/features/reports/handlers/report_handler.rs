use axum::{
    extract::{multipart::Field, Multipart, State},
    http::StatusCode,
    Json,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::evidence::{EvidenceFile, PreviewProvider};
use crate::features::geolocation::ReportedPosition;
use crate::features::reports::dtos::{ReportFieldsDto, ReportResponseDto, SubmitReportDto};
use crate::features::reports::models::ReportDraft;
use crate::features::reports::services::{ReportSubmissionService, SubmissionError};
use crate::shared::constants::MSG_REPORT_SUBMITTED;
use crate::shared::types::ApiResponse;

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub submission_service: Arc<ReportSubmissionService>,
    pub previews: Arc<dyn PreviewProvider>,
}

/// Submit a garbage report
///
/// Accepts multipart/form-data with:
/// - `garbage_level`: `Low`, `Medium` or `High` (required)
/// - `waste_types`: repeated, or one comma-separated list (at least one)
/// - `remarks`: free text (optional)
/// - `files`: photos or videos (at least one)
/// - `latitude`, `longitude`, `accuracy`: the browser's location fix
/// - `location_error`: the browser's geolocation error code when no fix was obtained
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    request_body(
        content = SubmitReportDto,
        content_type = "multipart/form-data",
        description = "Report fields, evidence files and the device location",
    ),
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Missing or invalid fields, evidence or location"),
        (status = 413, description = "Request body too large"),
        (status = 502, description = "Storage or database unavailable")
    )
)]
pub async fn submit_report(
    State(state): State<ReportState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>), AppError> {
    let mut fields = ReportFieldsDto::default();
    let mut files: Vec<EvidenceFile> = Vec::new();
    let mut position = ReportedPosition::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "garbage_level" => {
                let text = read_text(field, &field_name).await?;
                let text = text.trim();
                if !text.is_empty() {
                    fields.garbage_level = Some(text.to_string());
                }
            }
            "waste_types" | "waste_type" => {
                let text = read_text(field, &field_name).await?;
                fields.waste_types.extend(
                    text.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                );
            }
            "remarks" => {
                let text = read_text(field, &field_name).await?;
                if !text.trim().is_empty() {
                    fields.remarks = Some(text);
                }
            }
            "files" | "file" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                files.push(EvidenceFile::new(file_name, content_type, data.to_vec()));
            }
            "latitude" => {
                let text = read_text(field, &field_name).await?;
                position.latitude = parse_number(&field_name, &text)?;
            }
            "longitude" => {
                let text = read_text(field, &field_name).await?;
                position.longitude = parse_number(&field_name, &text)?;
            }
            "accuracy" => {
                let text = read_text(field, &field_name).await?;
                position.accuracy = parse_number(&field_name, &text)?;
            }
            "location_error" => {
                let text = read_text(field, &field_name).await?;
                position.error_code = parse_number(&field_name, &text)?;
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let mut draft = ReportDraft::new(state.previews.clone());
    draft.fields = fields;

    let received = files.len();
    let accepted = draft.evidence_mut().add_files(files);
    if accepted < received {
        debug!(
            "Dropped {} unsupported file(s) from submission",
            received - accepted
        );
    }

    let location_error = draft.request_location(&position).await.err();

    let report = state
        .submission_service
        .submit(&mut draft)
        .await
        .map_err(|e| match (e, location_error) {
            // Surface why the device had no fix rather than the generic prompt
            (SubmissionError::MissingLocation, Some(geo)) => AppError::Validation(geo.to_string()),
            (e, _) => e.into(),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report.into()),
            Some(MSG_REPORT_SUBMITTED.to_string()),
        )),
    ))
}

async fn read_text(field: Field<'_>, name: &str) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}

/// Empty text means "not sent"
fn parse_number<T: FromStr>(name: &str, text: &str) -> Result<Option<T>, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<T>()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("Invalid {}: {}", name, text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::routes;
    use crate::shared::constants::{MSG_MISSING_EVIDENCE, MSG_MISSING_LOCATION};
    use crate::shared::test_helpers::{
        InMemoryObjectStore, InMemoryReportRepository, RecordingPreviews,
    };
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::Value;

    struct Fixture {
        server: TestServer,
        store: Arc<InMemoryObjectStore>,
        repository: Arc<InMemoryReportRepository>,
        previews: Arc<RecordingPreviews>,
    }

    fn fixture(store: InMemoryObjectStore, repository: InMemoryReportRepository) -> Fixture {
        let store = Arc::new(store);
        let repository = Arc::new(repository);
        let previews = Arc::new(RecordingPreviews::default());
        let state = ReportState {
            submission_service: Arc::new(ReportSubmissionService::new(
                store.clone(),
                repository.clone(),
            )),
            previews: previews.clone(),
        };
        let server = TestServer::new(routes::routes(state, 1024 * 1024)).unwrap();

        Fixture {
            server,
            store,
            repository,
            previews,
        }
    }

    fn jpeg(name: &str) -> Part {
        Part::bytes(vec![0xFF, 0xD8, 0xFF])
            .file_name(name)
            .mime_type("image/jpeg")
    }

    fn complete_form() -> MultipartForm {
        MultipartForm::new()
            .add_text("garbage_level", "Medium")
            .add_text("waste_types", "Plastic,Household")
            .add_text("remarks", "Near the bus stop")
            .add_part("files", jpeg("a.jpg"))
            .add_text("latitude", "12.9716")
            .add_text("longitude", "77.5946")
            .add_text("accuracy", "15")
    }

    #[tokio::test]
    async fn test_submit_report_created() {
        let f = fixture(InMemoryObjectStore::new(), InMemoryReportRepository::new());

        let response = f.server.post("/api/reports").multipart(complete_form()).await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], MSG_REPORT_SUBMITTED);
        assert_eq!(body["data"]["garbage_level"], "Medium");
        assert_eq!(
            body["data"]["waste_type"],
            serde_json::json!(["Plastic", "Household"])
        );
        assert_eq!(body["data"]["status"], "pending");
        assert_eq!(body["data"]["location_label"], "12.971600° N, 77.594600° E");

        let saved = f.repository.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].remarks, "Near the bus stop");
        assert_eq!(f.store.uploaded_paths(), saved[0].media_paths);
        assert!(f.previews.all_released_once());
    }

    #[tokio::test]
    async fn test_repeated_waste_type_fields_are_merged() {
        let f = fixture(InMemoryObjectStore::new(), InMemoryReportRepository::new());
        let form = MultipartForm::new()
            .add_text("garbage_level", "Low")
            .add_text("waste_types", "Industrial")
            .add_text("waste_types", "E-waste")
            .add_part("files", jpeg("a.jpg"))
            .add_text("latitude", "-33.8688")
            .add_text("longitude", "151.2093");

        let response = f.server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(
            body["data"]["waste_type"],
            serde_json::json!(["Industrial", "E-waste"])
        );
        assert_eq!(body["data"]["location"]["accuracy"], 0.0);
    }

    #[tokio::test]
    async fn test_unknown_waste_type_rejected_before_upload() {
        let f = fixture(InMemoryObjectStore::new(), InMemoryReportRepository::new());
        let form = MultipartForm::new()
            .add_text("garbage_level", "Low")
            .add_text("waste_types", "Metal")
            .add_part("files", jpeg("a.jpg"))
            .add_text("latitude", "-33.8688")
            .add_text("longitude", "151.2093");

        let response = f.server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["errors"],
            serde_json::json!(["waste_types: Unknown waste type: Metal"])
        );
        assert!(f.store.attempted_paths().is_empty());
        assert!(f.repository.saved().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_fields_listed() {
        let f = fixture(InMemoryObjectStore::new(), InMemoryReportRepository::new());
        let form = MultipartForm::new()
            .add_part("files", jpeg("a.jpg"))
            .add_text("latitude", "1")
            .add_text("longitude", "2");

        let response = f.server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["errors"],
            serde_json::json!([
                "garbage_level: Please select a garbage level",
                "waste_types: Please select at least one waste type"
            ])
        );
        assert!(f.store.attempted_paths().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_files_only_is_missing_evidence() {
        let f = fixture(InMemoryObjectStore::new(), InMemoryReportRepository::new());
        let form = MultipartForm::new()
            .add_text("garbage_level", "High")
            .add_text("waste_types", "Other")
            .add_part(
                "files",
                Part::bytes(b"hello".to_vec())
                    .file_name("notes.txt")
                    .mime_type("text/plain"),
            )
            .add_text("latitude", "1")
            .add_text("longitude", "2");

        let response = f.server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], MSG_MISSING_EVIDENCE);
        assert!(f.repository.saved().is_empty());
    }

    #[tokio::test]
    async fn test_missing_location_without_error_code() {
        let f = fixture(InMemoryObjectStore::new(), InMemoryReportRepository::new());
        let form = MultipartForm::new()
            .add_text("garbage_level", "High")
            .add_text("waste_types", "Organic")
            .add_part("files", jpeg("a.jpg"));

        let response = f.server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], MSG_MISSING_LOCATION);
    }

    #[tokio::test]
    async fn test_permission_denied_message_surfaces() {
        let f = fixture(InMemoryObjectStore::new(), InMemoryReportRepository::new());
        let form = MultipartForm::new()
            .add_text("garbage_level", "High")
            .add_text("waste_types", "Organic")
            .add_part("files", jpeg("a.jpg"))
            .add_text("location_error", "1");

        let response = f.server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Please allow location access to continue");
        assert!(f.store.attempted_paths().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_coordinate_is_bad_request() {
        let f = fixture(InMemoryObjectStore::new(), InMemoryReportRepository::new());
        let form = complete_form().add_text("latitude", "north");

        let response = f.server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid latitude: north");
    }

    #[tokio::test]
    async fn test_storage_failure_is_bad_gateway() {
        let f = fixture(
            InMemoryObjectStore::new().fail_on_upload(2),
            InMemoryReportRepository::new(),
        );
        let form = complete_form().add_part("files", jpeg("b.jpg"));

        let response = f.server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to upload file: "));
        assert_eq!(f.store.deleted_paths().len(), 1);
        assert!(f.store.uploaded_paths().is_empty());
        assert!(f.repository.saved().is_empty());
        assert!(f.previews.all_released_once());
    }

    #[tokio::test]
    async fn test_database_failure_is_bad_gateway() {
        let f = fixture(
            InMemoryObjectStore::new(),
            InMemoryReportRepository::failing("connection refused"),
        );

        let response = f.server.post("/api/reports").multipart(complete_form()).await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to save report: "));
        assert!(f.store.uploaded_paths().is_empty());
    }

    #[test]
    fn test_parse_number_treats_blank_as_absent() {
        assert_eq!(parse_number::<f64>("accuracy", "  ").unwrap(), None);
        assert_eq!(parse_number::<f64>("accuracy", "3.5").unwrap(), Some(3.5));
        assert!(parse_number::<u16>("location_error", "x").is_err());
    }
}
