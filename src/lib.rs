//! Citizen reporting of garbage vulnerable points
//!
//! A report is composed as a [`features::reports::models::ReportDraft`]
//! (fields, evidence, location) and turned into stored evidence plus one
//! metadata row by [`features::reports::ReportSubmissionService`].

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
