use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::geolocation::GeoLocation;

/// How much garbage has accumulated at the reported point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum GarbageLevel {
    Low,
    Medium,
    High,
}

impl GarbageLevel {
    pub const ALL: [GarbageLevel; 3] = [GarbageLevel::Low, GarbageLevel::Medium, GarbageLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            GarbageLevel::Low => "Low",
            GarbageLevel::Medium => "Medium",
            GarbageLevel::High => "High",
        }
    }
}

impl std::fmt::Display for GarbageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GarbageLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("Unknown garbage level: {}", s))
    }
}

/// Category of waste found at the reported point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum WasteType {
    Plastic,
    Organic,
    #[serde(rename = "E-waste")]
    EWaste,
    Medical,
    Construction,
    Household,
    Industrial,
    Other,
}

impl WasteType {
    pub const ALL: [WasteType; 8] = [
        WasteType::Plastic,
        WasteType::Organic,
        WasteType::EWaste,
        WasteType::Medical,
        WasteType::Construction,
        WasteType::Household,
        WasteType::Industrial,
        WasteType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteType::Plastic => "Plastic",
            WasteType::Organic => "Organic",
            WasteType::EWaste => "E-waste",
            WasteType::Medical => "Medical",
            WasteType::Construction => "Construction",
            WasteType::Household => "Household",
            WasteType::Industrial => "Industrial",
            WasteType::Other => "Other",
        }
    }
}

impl std::fmt::Display for WasteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown waste type: {}", s))
    }
}

/// Review lifecycle of a report; only downstream review tooling moves it past `Pending`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Completed,
    Rejected,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::InProgress => "in_progress",
            ReportStatus::Completed => "completed",
            ReportStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of `garbage_reports`
#[derive(Debug, Clone, PartialEq)]
pub struct GarbageReport {
    pub id: Uuid,
    pub garbage_level: GarbageLevel,
    pub waste_types: Vec<WasteType>,
    pub remarks: String,
    pub location: GeoLocation,
    pub media_paths: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub status: ReportStatus,
}
