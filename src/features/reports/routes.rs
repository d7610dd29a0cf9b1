use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::features::reports::handlers::{self, ReportState};

/// Create routes for the reports feature
///
/// `body_limit` caps the multipart body, evidence included.
pub fn routes(state: ReportState, body_limit: usize) -> Router {
    Router::new()
        .route("/api/reports", post(handlers::submit_report))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
