use std::sync::Arc;

use crate::features::evidence::{EvidenceCollector, PreviewProvider};
use crate::features::geolocation::{
    GeoLocation, GeolocationError, LocationCapture, LocationProvider,
};
use crate::features::reports::dtos::ReportFieldsDto;

/// In-memory state of one report being composed
///
/// Nothing here is persisted. A successful submission resets the draft;
/// a failed one leaves it intact for a retry.
pub struct ReportDraft {
    pub fields: ReportFieldsDto,
    evidence: EvidenceCollector,
    location: LocationCapture,
}

impl ReportDraft {
    pub fn new(previews: Arc<dyn PreviewProvider>) -> Self {
        Self {
            fields: ReportFieldsDto::default(),
            evidence: EvidenceCollector::new(previews),
            location: LocationCapture::new(),
        }
    }

    pub fn with_location_capture(mut self, location: LocationCapture) -> Self {
        self.location = location;
        self
    }

    pub fn evidence(&self) -> &EvidenceCollector {
        &self.evidence
    }

    pub fn evidence_mut(&mut self) -> &mut EvidenceCollector {
        &mut self.evidence
    }

    pub fn location(&self) -> Option<GeoLocation> {
        self.location.location()
    }

    pub async fn request_location(
        &mut self,
        provider: &dyn LocationProvider,
    ) -> Result<GeoLocation, GeolocationError> {
        self.location.request_location(provider).await
    }

    /// Back to an empty form: fields cleared, previews released, location unset
    pub fn reset(&mut self) {
        self.fields = ReportFieldsDto::default();
        self.evidence.clear();
        self.location.clear();
    }
}
