use utoipa::{Modify, OpenApi};

use crate::features::geolocation::GeoLocation;
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers, models};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports (public)
        reports_handlers::submit_report,
    ),
    components(
        schemas(
            GeoLocation,
            models::GarbageLevel,
            models::WasteType,
            models::ReportStatus,
            reports_dtos::ReportFieldsDto,
            reports_dtos::SubmitReportDto,
            reports_dtos::ReportResponseDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
        )
    ),
    tags(
        (name = "reports", description = "Garbage vulnerable point reports"),
    ),
    info(
        title = "GVP Report API",
        version = "0.1.0",
        description = "API documentation for garbage vulnerable point reporting",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
