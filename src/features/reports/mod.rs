//! Report submission: fields, draft state, storage and the HTTP endpoint

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use handlers::ReportState;
pub use services::{PgReportRepository, ReportSubmissionService};
