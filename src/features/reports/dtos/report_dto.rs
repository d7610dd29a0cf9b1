use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::features::geolocation::GeoLocation;
use crate::features::reports::models::{GarbageLevel, GarbageReport, ReportStatus, WasteType};

/// Candidate report fields as entered by the citizen
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct ReportFieldsDto {
    /// One of `Low`, `Medium`, `High`
    #[schema(example = "High")]
    #[validate(
        required(message = "Please select a garbage level"),
        custom(function = "validate_garbage_level")
    )]
    pub garbage_level: Option<String>,

    /// One or more of the eight waste types
    #[schema(example = json!(["Plastic", "Household"]))]
    #[validate(
        length(min = 1, message = "Please select at least one waste type"),
        custom(function = "validate_waste_types")
    )]
    pub waste_types: Vec<String>,

    pub remarks: Option<String>,
}

fn validate_garbage_level(value: &str) -> Result<(), ValidationError> {
    value.parse::<GarbageLevel>().map(|_| ()).map_err(|_| {
        ValidationError::new("garbage_level")
            .with_message(Cow::from("Garbage level must be Low, Medium or High"))
    })
}

fn validate_waste_types(values: &[String]) -> Result<(), ValidationError> {
    match values.iter().find(|v| v.parse::<WasteType>().is_err()) {
        Some(unknown) => Err(ValidationError::new("waste_types")
            .with_message(Cow::from(format!("Unknown waste type: {}", unknown)))),
        None => Ok(()),
    }
}

/// Fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFields {
    pub garbage_level: GarbageLevel,
    /// Non-empty, no duplicates, in selection order
    pub waste_types: Vec<WasteType>,
    pub remarks: Option<String>,
}

impl ReportFieldsDto {
    /// Validate and convert into typed fields
    pub fn to_fields(&self) -> Result<ReportFields, ValidationErrors> {
        self.validate()?;

        let garbage_level = self
            .garbage_level
            .as_deref()
            .unwrap_or_default()
            .parse::<GarbageLevel>()
            .map_err(|e| single_error("garbage_level", e))?;

        let mut waste_types: Vec<WasteType> = Vec::with_capacity(self.waste_types.len());
        for value in &self.waste_types {
            let kind = value
                .parse::<WasteType>()
                .map_err(|e| single_error("waste_types", e))?;
            if !waste_types.contains(&kind) {
                waste_types.push(kind);
            }
        }

        Ok(ReportFields {
            garbage_level,
            waste_types,
            remarks: self.remarks.clone(),
        })
    }
}

fn single_error(field: &'static str, message: String) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(field).with_message(Cow::from(message)));
    errors
}

/// Multipart body of `POST /api/reports`
///
/// Documentation only; the handler reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SubmitReportDto {
    #[schema(example = "High")]
    pub garbage_level: String,
    /// Repeat the field or send a comma-separated list
    #[schema(example = "Plastic,Household")]
    pub waste_types: Vec<String>,
    pub remarks: Option<String>,
    /// Photos or videos; other content types are ignored
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub files: Vec<String>,
    #[schema(example = 12.9716)]
    pub latitude: Option<f64>,
    #[schema(example = 77.5946)]
    pub longitude: Option<f64>,
    #[schema(example = 15.0)]
    pub accuracy: Option<f64>,
    /// Browser `GeolocationPositionError.code` when no fix was obtained
    pub location_error: Option<u16>,
}

/// Response DTO for a submitted report
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub garbage_level: GarbageLevel,
    pub waste_type: Vec<WasteType>,
    pub remarks: String,
    pub location: GeoLocation,
    /// Human readable coordinates, e.g. `12.971600° N, 77.594600° E`
    pub location_label: String,
    pub media_paths: Vec<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl From<GarbageReport> for ReportResponseDto {
    fn from(r: GarbageReport) -> Self {
        Self {
            id: r.id,
            garbage_level: r.garbage_level,
            waste_type: r.waste_types,
            remarks: r.remarks,
            location_label: r.location.formatted(),
            location: r.location,
            media_paths: r.media_paths,
            status: r.status,
            created_at: r.created_at,
        }
    }
}
