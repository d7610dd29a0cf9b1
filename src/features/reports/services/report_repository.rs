use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;

use crate::core::error::Result;
use crate::features::reports::models::GarbageReport;

/// Metadata table for submitted reports
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn insert(&self, report: &GarbageReport) -> Result<()>;
}

/// `garbage_reports` table in Postgres
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn insert(&self, report: &GarbageReport) -> Result<()> {
        let waste_types: Vec<String> = report
            .waste_types
            .iter()
            .map(|w| w.as_str().to_string())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO garbage_reports
                (id, garbage_level, waste_type, remarks, location, media_paths, created_at, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(report.id)
        .bind(report.garbage_level.as_str())
        .bind(waste_types)
        .bind(&report.remarks)
        .bind(Json(&report.location))
        .bind(&report.media_paths)
        .bind(report.created_at)
        .bind(report.status.as_str())
        .execute(&self.pool)
        .await?;

        info!(
            "Report row saved: id={}, level={}, media={}",
            report.id,
            report.garbage_level,
            report.media_paths.len()
        );

        Ok(())
    }
}
