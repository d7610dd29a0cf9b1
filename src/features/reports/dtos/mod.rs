mod report_dto;

pub use report_dto::{ReportFields, ReportFieldsDto, ReportResponseDto, SubmitReportDto};
