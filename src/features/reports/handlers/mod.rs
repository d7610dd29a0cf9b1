mod report_handler;

pub use report_handler::{__path_submit_report, submit_report, ReportState};
